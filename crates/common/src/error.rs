//! Decode errors for ins binary programs.

use thiserror::Error;

/// Errors that occur while decoding a byte stream into a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Byte stream length is not a multiple of the record size.
    #[error("invalid byte stream length: {0} (must be multiple of 12)")]
    InvalidLength(usize),
}
