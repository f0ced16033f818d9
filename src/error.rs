//! Error types
//!
//! Store failures are always recovered by the board layer; gain errors are
//! the only errors a caller of the public driver API ever sees.

use core::fmt;

/// Parameter store operation result
pub type StoreResult<T> = Result<T, StoreError>;

/// Parameter store read failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// No file at the requested path
    NotFound,
    /// The store returned a non-positive status
    Io(i32),
    /// The file exists but is shorter than the structure being read
    ShortRead {
        /// Bytes required by the structure
        expected: usize,
        /// Bytes actually returned
        actual: usize,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "file not found"),
            Self::Io(status) => write!(f, "read failed with status {status}"),
            Self::ShortRead { expected, actual } => {
                write!(f, "short read ({actual} of {expected} bytes)")
            }
        }
    }
}

impl core::error::Error for StoreError {}

#[cfg(feature = "embedded")]
impl defmt::Format for StoreError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::NotFound => defmt::write!(f, "file not found"),
            Self::Io(status) => defmt::write!(f, "read failed with status {}", status),
            Self::ShortRead { expected, actual } => {
                defmt::write!(f, "short read ({} of {} bytes)", actual, expected);
            }
        }
    }
}

/// Synthesizer gain rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GainError {
    /// Requested gain is above the register range
    OutOfRange(u8),
}

impl fmt::Display for GainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(value) => write!(f, "gain {value} out of range (0-127)"),
        }
    }
}

impl core::error::Error for GainError {}

#[cfg(feature = "embedded")]
impl defmt::Format for GainError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::OutOfRange(value) => defmt::write!(f, "gain {} out of range (0-127)", value),
        }
    }
}
