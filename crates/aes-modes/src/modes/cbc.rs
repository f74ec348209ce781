//! Cipher block chaining.

use aes_core::{xor_in_place, BlockCipher, KeySize, BLOCK_LEN};

use crate::context::{ensure_aligned, require_iv, trace_call, Context};
use crate::error::Result;
use crate::mode::Mode;

impl<K: KeySize> Context<K> {
    /// Encrypts a whole number of blocks in place. Each ciphertext block
    /// becomes the IV for the next.
    pub fn cbc_encrypt(&mut self, buf: &mut [u8]) -> Result<()> {
        ensure_aligned(Mode::Cbc, buf.len())?;
        let iv = require_iv(&mut self.iv, Mode::Cbc)?;
        trace_call(Mode::Cbc, "encrypt", buf.len());
        self.stream.reset();

        for chunk in buf.chunks_exact_mut(BLOCK_LEN) {
            for (v, p) in iv.iter_mut().zip(chunk.iter()) {
                *v ^= *p;
            }
            self.cipher.encrypt_block(iv);
            chunk.copy_from_slice(iv);
        }
        Ok(())
    }

    /// Decrypts a whole number of blocks in place. The received ciphertext
    /// block becomes the IV for the next.
    pub fn cbc_decrypt(&mut self, buf: &mut [u8]) -> Result<()> {
        ensure_aligned(Mode::Cbc, buf.len())?;
        let iv = require_iv(&mut self.iv, Mode::Cbc)?;
        trace_call(Mode::Cbc, "decrypt", buf.len());
        self.stream.reset();

        for chunk in buf.chunks_exact_mut(BLOCK_LEN) {
            let mut block = [0u8; BLOCK_LEN];
            block.copy_from_slice(chunk);
            let saved = block;
            self.cipher.decrypt_block(&mut block);
            xor_in_place(&mut block, iv);
            chunk.copy_from_slice(&block);
            *iv = saved;
        }
        Ok(())
    }
}
