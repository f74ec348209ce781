//! The reusable cipher context: round keys plus chaining state.

use core::fmt;

use aes_core::{Aes, Block, CipherKey, KeySize, BLOCK_LEN};
use log::debug;
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::mode::Mode;

/// Expanded key plus the IV or counter block of the active chain.
///
/// CBC, CFB, OFB and CTR advance the IV as they go, so consecutive calls on
/// one context continue the same stream: two calls produce the same bytes as
/// one call over the concatenated buffers. The stream modes keep the unused
/// tail of their last keystream block, so this also holds for splits that
/// fall inside a block. Use [`Context::set_iv`] to start a new stream
/// without re-expanding the key.
///
/// Stateful operations take `&mut self`; share a context between threads
/// only behind a lock, or give each thread its own.
pub struct Context<K: KeySize> {
    pub(crate) cipher: Aes<K>,
    pub(crate) iv: Option<Block>,
    pub(crate) stream: Keystream,
}

impl<K: KeySize> Context<K> {
    /// Expands `key`. The context has no IV and only supports ECB until
    /// [`Context::set_iv`] is called.
    pub fn new(key: &CipherKey<K>) -> Self {
        debug!(
            "expanded {} key schedule ({} round keys)",
            K::NAME,
            K::ROUNDS + 1
        );
        Self {
            cipher: Aes::new(key),
            iv: None,
            stream: Keystream::empty(),
        }
    }

    /// Expands `key` and installs the initial chaining state.
    pub fn with_iv(key: &CipherKey<K>, iv: Block) -> Self {
        let mut ctx = Self::new(key);
        ctx.iv = Some(iv);
        ctx
    }

    /// Builds a context from untyped slices, checking both lengths.
    pub fn from_slices(key: &[u8], iv: Option<&[u8]>) -> Result<Self> {
        let key = CipherKey::<K>::try_from(key)?;
        let iv = iv.map(parse_iv).transpose()?;
        let mut ctx = Self::new(&key);
        ctx.iv = iv;
        Ok(ctx)
    }

    /// Replaces the chaining state and drops any pending keystream. The key
    /// schedule is kept.
    pub fn set_iv(&mut self, iv: Block) {
        debug!("{} context IV reset", K::NAME);
        self.iv = Some(iv);
        self.stream.reset();
    }

    /// Current chaining state. Mid-block in CFB this holds the ciphertext
    /// bytes produced so far in place of the consumed IV bytes.
    pub fn iv(&self) -> Option<&Block> {
        self.iv.as_ref()
    }

    /// The underlying block cipher.
    pub fn cipher(&self) -> &Aes<K> {
        &self.cipher
    }
}

impl<K: KeySize> fmt::Debug for Context<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("variant", &K::NAME)
            .field("has_iv", &self.iv.is_some())
            .field("pending_keystream", &(BLOCK_LEN - self.stream.offset))
            .field("keystream_mode", &self.stream.owner)
            .finish()
    }
}

impl<K: KeySize> Drop for Context<K> {
    fn drop(&mut self) {
        self.iv.zeroize();
        self.stream.block.zeroize();
    }
}

/// Converts an IV slice into a block.
pub fn parse_iv(iv: &[u8]) -> Result<Block> {
    Block::try_from(iv).map_err(|_| Error::InvalidIvLength(iv.len()))
}

/// Unused keystream left over from the last stream-mode call.
pub(crate) struct Keystream {
    pub(crate) block: Block,
    /// Index of the next unused byte; `BLOCK_LEN` when exhausted.
    pub(crate) offset: usize,
    owner: Option<Mode>,
}

impl Keystream {
    pub(crate) const fn empty() -> Self {
        Self {
            block: [0u8; BLOCK_LEN],
            offset: BLOCK_LEN,
            owner: None,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.block.zeroize();
        self.offset = BLOCK_LEN;
        self.owner = None;
    }

    /// Takes the keystream for `mode`, discarding bytes another mode left.
    #[cfg(any(feature = "cfb", feature = "ofb", feature = "ctr"))]
    pub(crate) fn claim(&mut self, mode: Mode) {
        if self.owner != Some(mode) {
            self.reset();
            self.owner = Some(mode);
        }
    }

    /// XORs `buf` with the keystream, calling `refill` each time a fresh
    /// block is needed.
    #[cfg(any(feature = "ofb", feature = "ctr"))]
    pub(crate) fn apply(&mut self, buf: &mut [u8], mut refill: impl FnMut(&mut Block)) {
        for byte in buf.iter_mut() {
            if self.offset == BLOCK_LEN {
                refill(&mut self.block);
                self.offset = 0;
            }
            *byte ^= self.block[self.offset];
            self.offset += 1;
        }
    }
}

/// Rejects buffers that are not a whole number of blocks.
pub(crate) fn ensure_aligned(mode: Mode, len: usize) -> Result<()> {
    if len % BLOCK_LEN != 0 {
        debug!("{mode} rejected unaligned buffer of {len} bytes");
        return Err(Error::UnalignedBuffer { mode, len });
    }
    Ok(())
}

/// Borrows the chaining state or reports that none was installed.
#[cfg(any(feature = "cbc", feature = "cfb", feature = "ofb", feature = "ctr"))]
pub(crate) fn require_iv(iv: &mut Option<Block>, mode: Mode) -> Result<&mut Block> {
    iv.as_mut().ok_or_else(|| {
        debug!("{mode} rejected: context has no IV");
        Error::MissingIv(mode)
    })
}

#[cfg(any(
    feature = "ecb",
    feature = "cbc",
    feature = "cfb",
    feature = "ofb",
    feature = "ctr"
))]
pub(crate) fn trace_call(mode: Mode, op: &str, len: usize) {
    log::trace!("{mode} {op} over {len} bytes");
}
