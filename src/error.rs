//! Error types for pair parsing.

use thiserror::Error;

/// Result type alias for pair sorting operations
pub type Result<T> = std::result::Result<T, SortError>;

/// Errors produced while turning input into pairs
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] Malformed),
}

/// Why an input could not be read as key/value pairs
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Malformed {
    #[error("key '{key}' at token {position} has no value")]
    DanglingKey { key: String, position: usize },

    #[error("empty token at position {position} (use exactly one space between tokens)")]
    EmptyToken { position: usize },
}

impl SortError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, SortError::MalformedInput(_))
    }

    /// Token index the error points at.
    pub fn position(&self) -> usize {
        match self {
            SortError::MalformedInput(Malformed::DanglingKey { position, .. })
            | SortError::MalformedInput(Malformed::EmptyToken { position }) => *position,
        }
    }
}
