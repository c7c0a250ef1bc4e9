use thiserror::Error;

/// Errors produced by type construction and boundary parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid {kind} identifier: {value}")]
    InvalidId { kind: &'static str, value: String },

    #[error("invalid actor email: {0}")]
    InvalidEmail(String),

    #[error("invalid loan amount: {0}")]
    InvalidAmount(String),
}
