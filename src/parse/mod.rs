use std::fmt;

mod builder;
mod expander;
mod tokenizer;

pub use builder::{CommandBuilder, CommandLine};
pub use expander::PidExpander;
pub use tokenizer::{is_comment, tokenize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    LineTooLong { len: usize, max: usize },
    TooManyArgs { count: usize, max: usize },
    ExpansionOverflow { token: String, capacity: usize },
}

impl ParseError {
    /// Only an overflowing expansion takes the shell down; the limits reject a single line.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::ExpansionOverflow { .. })
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::LineTooLong { len, max } => {
                write!(f, "line too long: {} characters (max {})", len, max)
            }
            ParseError::TooManyArgs { count, max } => {
                write!(f, "too many arguments: {} (max {})", count, max)
            }
            ParseError::ExpansionOverflow { token, capacity } => write!(
                f,
                "pid expansion of '{}' would overflow the {} character token buffer",
                token, capacity
            ),
        }
    }
}

impl std::error::Error for ParseError {}
