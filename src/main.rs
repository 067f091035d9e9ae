use color_print::{cformat, cprintln};
use genasm::{render, Assembler, TemplateStore};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Instruction set description
    config: String,

    /// Input file
    #[clap(default_value = "main.asm")]
    input: String,

    /// Output file
    #[clap(short, long, default_value = "main.bin")]
    output: String,

    /// Dump the assembled program
    #[clap(short, long)]
    dump: bool,
}

fn read_lines(path: &str) -> Vec<String> {
    use std::io::BufRead;

    let file = std::fs::File::open(path)
        .expect(&cformat!("<r,s>Failed to open file</>: {}", path));
    std::io::BufReader::new(file)
        .lines()
        .map(|line| line.expect(&cformat!("Failed to read line")))
        .collect()
}

fn main() {
    use clap::Parser;
    use std::io::Write;

    let args: Args = Args::parse();

    // 1. Load the instruction set
    let config_lines = read_lines(&args.config);
    let (config, templates) = match TemplateStore::load(&config_lines) {
        Ok(ok) => ok,
        Err(err) => {
            cprintln!("<red,bold>error</>: {}", err);
            cprintln!("     <blue>--></> <underline>{}</>", args.config);
            std::process::exit(1);
        }
    };

    // 2. Scan the program and collect labels
    let source = read_lines(&args.input);
    let mut asm = Assembler::new(config, templates);
    if let Err(err) = asm.scan(&source) {
        err.print_diag(&args.input, &source);
        std::process::exit(1);
    }
    for (msg, line) in asm.messages() {
        let raw = source.get(line - 1).map(|s| s.as_str()).unwrap_or("");
        msg.print(&args.input, *line, raw);
    }

    // 3. Resolve labels and encode
    let words = match asm.encode() {
        Ok(words) => words,
        Err(err) => {
            err.print_diag(&args.input, &source);
            std::process::exit(1);
        }
    };

    // 4. Write the image
    let rendered = render(&words, asm.config());
    let mut file = std::fs::File::create(&args.output)
        .expect(&cformat!("<r,s>Failed to create file</>: {}", &args.output));
    file.write_all(rendered.as_bytes())
        .expect(&cformat!("<r,s>Failed to write file</>: {}", &args.output));

    if args.dump {
        for (instr, word) in asm.instructions().iter().zip(&words) {
            println!(
                "{}",
                cformat!(
                    "[<green>{:0>4X}</>] {} | <red>{:<8}</><blue>{}</>",
                    instr.pc,
                    word,
                    instr.mnemonic,
                    instr.operands.join(" ")
                )
            );
        }
    }
}
