use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("First line of the config must be HEX or BIN, found `{0}`")]
    MalformedHeader(String),

    #[error("Cannot parse template line `{0}`")]
    MalformedTemplate(String),

    #[error("Unknown constant: `&{0}`")]
    UnknownConstant(String),

    #[error("Constant substitution does not terminate: `&{0}`")]
    ConstantCycle(String),

    #[error("Template `{name}` is {width} bits wide, expected {expected}")]
    WidthMismatch {
        name: String,
        width: u32,
        expected: u32,
    },
}

#[derive(Error, Debug)]
pub enum AsmError {
    #[error("Unknown instruction: `{mnemonic}`")]
    UnknownInstruction { mnemonic: String, line: usize },

    #[error("Wrong number of operands for `{mnemonic}`: expected {expected}, got {found}")]
    ArityMismatch {
        mnemonic: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    #[error("Operand `{found}` does not match `{expected}` of `{mnemonic}`")]
    SyntaxMismatch {
        mnemonic: String,
        expected: String,
        found: String,
        line: usize,
    },

    #[error("Undefined label: `{name}`")]
    UndefinedLabel { name: String, line: usize },

    #[error("Cannot parse `{token}` as a number")]
    InvalidLiteral { token: String, line: usize },
}

impl AsmError {
    pub fn line(&self) -> usize {
        match self {
            AsmError::UnknownInstruction { line, .. }
            | AsmError::ArityMismatch { line, .. }
            | AsmError::SyntaxMismatch { line, .. }
            | AsmError::UndefinedLabel { line, .. }
            | AsmError::InvalidLiteral { line, .. } => *line,
        }
    }

    /// Print the error with its source location and the offending line
    pub fn print_diag(&self, file: &str, source: &[String]) {
        let line_num = self.line();
        let content = source
            .get(line_num - 1)
            .map(|s| s.as_str())
            .unwrap_or("");

        cprintln!("<red,bold>error</>: {}", self);
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line_num, content);
        cprintln!("      <blue>|</>");
    }
}
