use color_print::cprintln;

#[derive(Debug, Clone)]
pub enum Msg {
    Warn(String),
    Note(String),
}

impl Msg {
    pub fn print(&self, file: &str, line: usize, raw: &str) {
        match self {
            Msg::Warn(msg) => cprintln!("<yellow,bold>warn</>: {}", msg),
            Msg::Note(msg) => cprintln!("<green,bold>note</>: {}", msg),
        }
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line, raw);
        cprintln!("      <blue>|</>");
    }
}
