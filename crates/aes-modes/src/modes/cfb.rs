//! Cipher feedback with full-block (128-bit) segments.
//!
//! The keystream for each block is the encryption of the previous
//! ciphertext block. Ciphertext bytes are written back into the IV as they
//! are produced or received, so by the time a block is used up the IV holds
//! exactly that ciphertext block.

use aes_core::{BlockCipher, KeySize, BLOCK_LEN};

use crate::context::{require_iv, trace_call, Context};
use crate::error::Result;
use crate::mode::Mode;

impl<K: KeySize> Context<K> {
    /// Encrypts `buf` in place. Any length is accepted.
    pub fn cfb_encrypt(&mut self, buf: &mut [u8]) -> Result<()> {
        let iv = require_iv(&mut self.iv, Mode::Cfb)?;
        trace_call(Mode::Cfb, "encrypt", buf.len());
        let stream = &mut self.stream;
        stream.claim(Mode::Cfb);

        for byte in buf.iter_mut() {
            if stream.offset == BLOCK_LEN {
                stream.block = *iv;
                self.cipher.encrypt_block(&mut stream.block);
                stream.offset = 0;
            }
            *byte ^= stream.block[stream.offset];
            iv[stream.offset] = *byte;
            stream.offset += 1;
        }
        Ok(())
    }

    /// Decrypts `buf` in place. The received ciphertext, not the recovered
    /// plaintext, feeds the next block.
    pub fn cfb_decrypt(&mut self, buf: &mut [u8]) -> Result<()> {
        let iv = require_iv(&mut self.iv, Mode::Cfb)?;
        trace_call(Mode::Cfb, "decrypt", buf.len());
        let stream = &mut self.stream;
        stream.claim(Mode::Cfb);

        for byte in buf.iter_mut() {
            if stream.offset == BLOCK_LEN {
                stream.block = *iv;
                self.cipher.encrypt_block(&mut stream.block);
                stream.offset = 0;
            }
            let received = *byte;
            *byte ^= stream.block[stream.offset];
            iv[stream.offset] = received;
            stream.offset += 1;
        }
        Ok(())
    }
}
