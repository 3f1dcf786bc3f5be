use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("Unable to evaluate `{0}` as {1}")]
    OperandSyntax(String, &'static str),

    #[error("`{0}` is out of range for {1}")]
    OperandRange(String, &'static str),

    #[error("Unable to parse `{0}` as true / false")]
    BooleanSyntax(String),

    #[error("Unknown operation: `{0}`")]
    UnknownInstruction(String),

    #[error("Undefined label: `{0}`")]
    UnknownLabel(String),

    #[error("Re-defined label: `{0}`")]
    RedefinedLabel(String),

    #[error("Invalid operands: expected [{0}]")]
    BadOperands(String),
}

/// An [`ErrorKind`] pinned to the source line it was raised on.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Line {line}: {kind}")]
pub struct Error {
    /// 1-based source line number
    pub line: usize,
    /// The offending source text (code part, trimmed)
    pub raw: String,
    pub kind: ErrorKind,
}

impl Error {
    pub fn new(line: usize, raw: &str, kind: ErrorKind) -> Self {
        Self {
            line,
            raw: raw.trim().to_string(),
            kind,
        }
    }

    /// Print the error with file location and the offending line content.
    pub fn print_diag(&self, file: &str) {
        cprintln!("<red,bold>error</>: {}", self.kind);
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, self.line);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", self.line, self.raw);
        cprintln!("      <blue>|</>");
    }
}
