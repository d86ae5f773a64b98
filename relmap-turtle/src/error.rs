//! Error types for Turtle parsing.
//!
//! Lex and parse errors carry a byte offset plus a rendered message with
//! line/column information and a caret pointing into the offending source
//! line. The rendering lives here so the scanner and the parser report
//! errors in the same shape.

/// Error type for Turtle operations
#[derive(Debug, thiserror::Error)]
pub enum TurtleError {
    /// Invalid token in the input
    #[error("Lexer error at position {position}: {message}")]
    Lexer { position: usize, message: String },

    /// Unexpected token or invalid statement structure
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// Relative IRI that cannot be resolved
    #[error("IRI resolution error: {0}")]
    IriResolution(String),

    /// Prefixed name using a prefix no directive declared
    #[error("Undefined prefix: {0}")]
    UndefinedPrefix(String),
}

/// Result type for Turtle operations
pub type Result<T> = std::result::Result<T, TurtleError>;

impl TurtleError {
    /// Create a lexer error
    pub fn lexer(position: usize, message: impl Into<String>) -> Self {
        Self::Lexer {
            position,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Lexer error annotated with a snippet of the source at `offset`.
    pub fn lexer_in(source: &str, offset: usize, what: impl std::fmt::Display) -> Self {
        Self::lexer(offset, annotate(source, offset, what))
    }

    /// Parse error annotated with a snippet of the source at `offset`.
    pub fn parse_in(source: &str, offset: usize, what: impl std::fmt::Display) -> Self {
        Self::parse(offset, annotate(source, offset, what))
    }
}

/// Render `what` with line/column info and a caret under the offending
/// column of its source line.
fn annotate(source: &str, offset: usize, what: impl std::fmt::Display) -> String {
    let (line, column) = locate(source, offset);
    let text = source.lines().nth(line - 1).unwrap_or("");
    let caret = " ".repeat(column.saturating_sub(1));
    format!(
        "{} at line {}, column {}\n  |\n{} | {}\n  | {}^",
        what, line, column, line, text, caret
    )
}

/// Byte offset to 1-indexed (line, column). Columns count characters.
fn locate(source: &str, offset: usize) -> (usize, usize) {
    let upto = &source[..offset.min(source.len())];
    let line = upto.matches('\n').count() + 1;
    let column = upto.chars().rev().take_while(|&c| c != '\n').count() + 1;
    (line, column)
}
