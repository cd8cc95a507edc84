use thiserror::Error;

/// The text could not be split into statements at all.
///
/// Misplaced or malformed-looking lines never produce this; they are
/// recognized as comments.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GrammarError {
    #[error("Input is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidEncoding { valid_up_to: usize },

    #[error("Line {line} is {len} characters long, exceeding the limit of {max}")]
    LineTooLong { line: usize, len: usize, max: usize },
}
