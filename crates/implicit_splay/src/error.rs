use thiserror::Error;

/// Recoverable misuse of a position-based operation.
///
/// Both variants are reported before the tree is touched, so a failed call
/// leaves the sequence exactly as it was.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SplayError {
    #[error("index {index} is out of range for a sequence of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("range start {start} is greater than range end {end}")]
    InvalidRange { start: usize, end: usize },
}
