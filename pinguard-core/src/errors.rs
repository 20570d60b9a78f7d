//! errors.rs - Custom error types for the pinguard-core library.
//!
//! Only a malformed PIN (or an impossible PIN length) makes an evaluation fail.
//! Bad demographic dates and an exhausted search budget are absorbed by the
//! evaluator and never surface here.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use thiserror::Error;

/// Why a queried PIN was rejected before any analysis ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinFormatViolation {
    /// The PIN was the empty string.
    Empty,
    /// The PIN had the wrong number of characters.
    WrongLength { actual: usize },
    /// A character other than an ASCII digit was found (0-based position).
    NonDigit { position: usize, character: char },
}

impl fmt::Display for PinFormatViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinFormatViolation::Empty => write!(f, "PIN is empty"),
            PinFormatViolation::WrongLength { actual } => write!(f, "got {} characters", actual),
            PinFormatViolation::NonDigit { position, character } => {
                write!(f, "non-digit character {:?} at position {}", character, position + 1)
            }
        }
    }
}

/// This enum represents all possible error types in the `pinguard-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PinGuardError {
    #[error("Invalid PIN format. Must be {expected} digits: {reason}")]
    InvalidPinFormat {
        expected: usize,
        reason: PinFormatViolation,
    },

    #[error("PIN length must be either 4 or 6, got {0}")]
    UnsupportedPinLength(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}

impl PinGuardError {
    /// True for the one error class a host is expected to re-prompt on.
    pub fn is_format_error(&self) -> bool {
        matches!(self, PinGuardError::InvalidPinFormat { .. })
    }
}
