//! Portable AES (FIPS-197) for 128, 192 and 256-bit keys.
//!
//! This crate mirrors the FIPS-197 standard and provides:
//! - GF(2^8) helpers and the S-box tables.
//! - The key schedule for all three key sizes, selected by a [`KeySize`] type.
//! - Single-block encryption and decryption, plus the [`BlockCipher`] trait
//!   the mode layer builds on.
//!
//! Table lookups are plain array indexing; the crate makes no cache-timing
//! guarantees.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
pub mod gf;
mod key;
pub mod round;
mod sbox;

pub use crate::block::{increment_be, xor_in_place, Block, BLOCK_LEN};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key, Aes, BlockCipher};
pub use crate::key::{Aes128, Aes192, Aes256, CipherKey, KeyLengthError, KeySize, RoundKeys};
pub use crate::sbox::{inv_sbox, sbox, INV_SBOX, SBOX};
