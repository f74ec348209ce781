//! The five modes of operation, each behind its Cargo feature, and the
//! runtime dispatcher over them.

#[cfg(feature = "cbc")]
mod cbc;
#[cfg(feature = "cfb")]
mod cfb;
#[cfg(feature = "ctr")]
mod ctr;
#[cfg(feature = "ecb")]
mod ecb;
#[cfg(feature = "ofb")]
mod ofb;

use aes_core::KeySize;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::mode::{Direction, Mode};

impl<K: KeySize> Context<K> {
    /// Runs `mode` over `buf` in `direction`, for callers that pick the mode
    /// at runtime. ECB processes every block of the buffer.
    pub fn apply(&mut self, direction: Direction, mode: Mode, buf: &mut [u8]) -> Result<()> {
        match (mode, direction) {
            #[cfg(feature = "ecb")]
            (Mode::Ecb, Direction::Encrypt) => self.ecb_encrypt_buffer(buf),
            #[cfg(feature = "ecb")]
            (Mode::Ecb, Direction::Decrypt) => self.ecb_decrypt_buffer(buf),
            #[cfg(feature = "cbc")]
            (Mode::Cbc, Direction::Encrypt) => self.cbc_encrypt(buf),
            #[cfg(feature = "cbc")]
            (Mode::Cbc, Direction::Decrypt) => self.cbc_decrypt(buf),
            #[cfg(feature = "cfb")]
            (Mode::Cfb, Direction::Encrypt) => self.cfb_encrypt(buf),
            #[cfg(feature = "cfb")]
            (Mode::Cfb, Direction::Decrypt) => self.cfb_decrypt(buf),
            #[cfg(feature = "ofb")]
            (Mode::Ofb, _) => self.ofb_apply(buf),
            #[cfg(feature = "ctr")]
            (Mode::Ctr, _) => self.ctr_apply(buf),
            #[allow(unreachable_patterns)]
            (mode, _) => {
                let _ = buf;
                Err(Error::ModeDisabled(mode))
            }
        }
    }
}
