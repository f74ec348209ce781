//! Block-cipher modes of operation over AES.
//!
//! A [`Context`] owns the expanded key and, for the chaining modes, the IV or
//! counter block. ECB and CBC work on whole blocks; CFB, OFB and CTR accept
//! any length. OFB and CTR are their own inverse and expose a single
//! `*_apply` operation.
//!
//! The key size is the type parameter `K` ([`Aes128`], [`Aes192`],
//! [`Aes256`]). Each mode is behind a Cargo feature of the same name; all are
//! enabled by default.
//!
//! ```
//! # #[cfg(feature = "ctr")]
//! # {
//! use aes_modes::{Aes128, CipherKey, Context};
//!
//! let key = CipherKey::<Aes128>::from([0u8; 16]);
//! let mut ctx = Context::with_iv(&key, [0u8; 16]);
//! let mut buf = *b"any length works for counter mode";
//! ctx.ctr_apply(&mut buf).unwrap();
//! ctx.set_iv([0u8; 16]);
//! ctx.ctr_apply(&mut buf).unwrap();
//! assert_eq!(&buf, b"any length works for counter mode");
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod context;
mod error;
mod facade;
mod mode;
mod modes;

pub use aes_core::{Aes, Aes128, Aes192, Aes256, Block, BlockCipher, CipherKey, KeySize, BLOCK_LEN};

pub use crate::context::{parse_iv, Context};
pub use crate::error::{Error, Result};
pub use crate::facade::Cipher;
pub use crate::mode::{Direction, Mode};
