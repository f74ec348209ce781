//! Errors reported by the mode layer.

use aes_core::KeyLengthError;
use thiserror::Error;

use crate::mode::Mode;

/// Rejected calls. Every check runs before the buffer or the context is
/// modified.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// ECB and CBC only accept whole blocks.
    #[error("{mode} buffer length must be a multiple of 16 bytes, got {len}")]
    UnalignedBuffer {
        /// Mode that rejected the buffer.
        mode: Mode,
        /// Offending length.
        len: usize,
    },
    /// A chaining mode was used on a context created without an IV.
    #[error("{0} requires an initialization vector")]
    MissingIv(Mode),
    /// IV supplied as a slice of the wrong length.
    #[error("IV must be 16 bytes, got {0}")]
    InvalidIvLength(usize),
    /// Key supplied as a slice of the wrong length.
    #[error(transparent)]
    Key(#[from] KeyLengthError),
    /// The mode's Cargo feature is disabled in this build.
    #[error("{0} support is not compiled into this build")]
    ModeDisabled(Mode),
    /// Mode name could not be parsed.
    #[error("unknown mode of operation `{0}`")]
    UnknownMode(String),
}

/// Result alias for the mode layer.
pub type Result<T, E = Error> = core::result::Result<T, E>;
