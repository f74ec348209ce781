//! Mode and direction selectors for runtime dispatch.

use core::fmt;
use core::str::FromStr;

use crate::error::Error;

/// Block-cipher mode of operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Electronic codebook.
    Ecb,
    /// Cipher block chaining.
    Cbc,
    /// Cipher feedback with 128-bit segments.
    Cfb,
    /// Output feedback.
    Ofb,
    /// Counter mode with a 128-bit big-endian counter.
    Ctr,
}

impl Mode {
    /// Every mode, compiled in or not.
    pub const ALL: [Mode; 5] = [Mode::Ecb, Mode::Cbc, Mode::Cfb, Mode::Ofb, Mode::Ctr];

    /// Whether the mode's feature is enabled in this build.
    pub const fn is_enabled(self) -> bool {
        match self {
            Mode::Ecb => cfg!(feature = "ecb"),
            Mode::Cbc => cfg!(feature = "cbc"),
            Mode::Cfb => cfg!(feature = "cfb"),
            Mode::Ofb => cfg!(feature = "ofb"),
            Mode::Ctr => cfg!(feature = "ctr"),
        }
    }

    /// Modes compiled into this build.
    pub fn enabled() -> impl Iterator<Item = Mode> {
        Self::ALL.into_iter().filter(|mode| mode.is_enabled())
    }

    /// Whether the mode consumes an IV or counter block.
    pub const fn requires_iv(self) -> bool {
        !matches!(self, Mode::Ecb)
    }

    /// Whether buffers must be a whole number of blocks.
    pub const fn requires_alignment(self) -> bool {
        matches!(self, Mode::Ecb | Mode::Cbc)
    }

    /// Whether encryption and decryption are the same operation.
    pub const fn is_self_inverse(self) -> bool {
        matches!(self, Mode::Ofb | Mode::Ctr)
    }

    /// Upper-case name, e.g. `CBC`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Ecb => "ECB",
            Mode::Cbc => "CBC",
            Mode::Cfb => "CFB",
            Mode::Ofb => "OFB",
            Mode::Ctr => "CTR",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownMode(s.to_owned()))
    }
}

/// Whether a call encrypts or decrypts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Plaintext to ciphertext.
    Encrypt,
    /// Ciphertext to plaintext.
    Decrypt,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encrypt => f.write_str("encrypt"),
            Direction::Decrypt => f.write_str("decrypt"),
        }
    }
}
