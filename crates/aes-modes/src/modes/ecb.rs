//! Electronic codebook: every block is enciphered on its own.

use aes_core::{Block, BlockCipher, KeySize, BLOCK_LEN};

use crate::context::{ensure_aligned, trace_call, Context};
use crate::error::Result;
use crate::mode::Mode;

impl<K: KeySize> Context<K> {
    /// Encrypts one block in place.
    pub fn ecb_encrypt(&self, block: &mut Block) {
        self.cipher.encrypt_block(block);
    }

    /// Decrypts one block in place.
    pub fn ecb_decrypt(&self, block: &mut Block) {
        self.cipher.decrypt_block(block);
    }

    /// Encrypts a whole number of blocks in place.
    pub fn ecb_encrypt_buffer(&self, buf: &mut [u8]) -> Result<()> {
        ensure_aligned(Mode::Ecb, buf.len())?;
        trace_call(Mode::Ecb, "encrypt", buf.len());
        for chunk in buf.chunks_exact_mut(BLOCK_LEN) {
            let mut block = [0u8; BLOCK_LEN];
            block.copy_from_slice(chunk);
            self.cipher.encrypt_block(&mut block);
            chunk.copy_from_slice(&block);
        }
        Ok(())
    }

    /// Decrypts a whole number of blocks in place.
    pub fn ecb_decrypt_buffer(&self, buf: &mut [u8]) -> Result<()> {
        ensure_aligned(Mode::Ecb, buf.len())?;
        trace_call(Mode::Ecb, "decrypt", buf.len());
        for chunk in buf.chunks_exact_mut(BLOCK_LEN) {
            let mut block = [0u8; BLOCK_LEN];
            block.copy_from_slice(chunk);
            self.cipher.decrypt_block(&mut block);
            chunk.copy_from_slice(&block);
        }
        Ok(())
    }
}
