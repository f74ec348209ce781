//! Output feedback. The IV is re-encrypted for every block and the result is
//! both the keystream and the next IV; the ciphertext never feeds back.

use aes_core::{BlockCipher, KeySize};

use crate::context::{require_iv, trace_call, Context};
use crate::error::Result;
use crate::mode::Mode;

impl<K: KeySize> Context<K> {
    /// Encrypts or decrypts `buf` in place; the two are the same operation.
    /// Any length is accepted.
    pub fn ofb_apply(&mut self, buf: &mut [u8]) -> Result<()> {
        let iv = require_iv(&mut self.iv, Mode::Ofb)?;
        trace_call(Mode::Ofb, "apply", buf.len());
        let cipher = &self.cipher;
        self.stream.claim(Mode::Ofb);
        self.stream.apply(buf, |keystream| {
            cipher.encrypt_block(iv);
            *keystream = *iv;
        });
        Ok(())
    }
}
