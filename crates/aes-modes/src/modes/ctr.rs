//! Counter mode over a full 128-bit big-endian counter block.

use aes_core::{increment_be, BlockCipher, KeySize};

use crate::context::{require_iv, trace_call, Context};
use crate::error::Result;
use crate::mode::Mode;

impl<K: KeySize> Context<K> {
    /// Encrypts or decrypts `buf` in place; the two are the same operation.
    /// The counter is the context IV and wraps from all-`ff` to zero.
    pub fn ctr_apply(&mut self, buf: &mut [u8]) -> Result<()> {
        let counter = require_iv(&mut self.iv, Mode::Ctr)?;
        trace_call(Mode::Ctr, "apply", buf.len());
        let cipher = &self.cipher;
        self.stream.claim(Mode::Ctr);
        self.stream.apply(buf, |keystream| {
            *keystream = *counter;
            cipher.encrypt_block(keystream);
            increment_be(counter);
        });
        Ok(())
    }
}
