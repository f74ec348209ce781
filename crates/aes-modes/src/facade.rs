//! One-shot encryption over a stored key and IV.

use core::fmt;

use aes_core::{Block, CipherKey, KeySize};
use log::debug;
use zeroize::Zeroize;

use crate::context::{ensure_aligned, parse_iv, Context};
use crate::error::{Error, Result};
use crate::mode::{Direction, Mode};

/// Key and optional IV, with a fresh [`Context`] built for every call.
///
/// Unlike a [`Context`], calls do not chain into each other: encrypting the
/// same input twice gives the same output.
pub struct Cipher<K: KeySize> {
    key: CipherKey<K>,
    iv: Option<Block>,
}

impl<K: KeySize> Cipher<K> {
    /// ECB-only cipher.
    pub fn new(key: CipherKey<K>) -> Self {
        Self { key, iv: None }
    }

    /// Cipher usable with every mode.
    pub fn with_iv(key: CipherKey<K>, iv: Block) -> Self {
        Self { key, iv: Some(iv) }
    }

    /// Builds a cipher from untyped slices, checking both lengths.
    pub fn from_slices(key: &[u8], iv: Option<&[u8]>) -> Result<Self> {
        let key = CipherKey::try_from(key)?;
        let iv = iv.map(parse_iv).transpose()?;
        Ok(Self { key, iv })
    }

    /// Encrypts `input` into a new buffer.
    pub fn encrypt(&self, mode: Mode, input: &[u8]) -> Result<Vec<u8>> {
        self.crypt(Direction::Encrypt, mode, input)
    }

    /// Decrypts `input` into a new buffer.
    pub fn decrypt(&self, mode: Mode, input: &[u8]) -> Result<Vec<u8>> {
        self.crypt(Direction::Decrypt, mode, input)
    }

    /// Runs `mode` in `direction` over a copy of `input`.
    pub fn crypt(&self, direction: Direction, mode: Mode, input: &[u8]) -> Result<Vec<u8>> {
        if !mode.is_enabled() {
            debug!("{mode} requested but not compiled in");
            return Err(Error::ModeDisabled(mode));
        }
        if mode.requires_alignment() {
            ensure_aligned(mode, input.len())?;
        }
        let mut ctx = match (mode.requires_iv(), self.iv) {
            (false, _) => Context::new(&self.key),
            (true, Some(iv)) => Context::with_iv(&self.key, iv),
            (true, None) => {
                debug!("{mode} requested on a cipher without IV");
                return Err(Error::MissingIv(mode));
            }
        };

        let mut output = input.to_vec();
        ctx.apply(direction, mode, &mut output)?;
        Ok(output)
    }
}

impl<K: KeySize> fmt::Debug for Cipher<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher")
            .field("variant", &K::NAME)
            .field("has_iv", &self.iv.is_some())
            .finish()
    }
}

impl<K: KeySize> Drop for Cipher<K> {
    fn drop(&mut self) {
        self.iv.zeroize();
    }
}
