use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LexError {
    #[error("Unexpected character '{character}' on line {line}")]
    UnexpectedCharacter { character: char, line: usize },
    #[error("Unterminated string literal starting on line {line}")]
    UnterminatedString { line: usize },
    #[error("Invalid number literal '{literal}' on line {line}")]
    InvalidNumberLiteral { literal: String, line: usize },
}

pub type LexResult<T> = Result<T, LexError>;
