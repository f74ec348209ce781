//! Key sizes, key material and expanded round keys.

use core::fmt;

use thiserror::Error;
use zeroize::Zeroize;

use crate::block::{Block, BLOCK_LEN};

mod sealed {
    pub trait Sealed {}
}

/// One of the three AES key sizes.
///
/// The key size is a type parameter rather than a runtime value so that the
/// round count and schedule length are fixed when a cipher is constructed.
pub trait KeySize: sealed::Sealed + Send + Sync + 'static {
    /// Key length in bytes.
    const KEY_LEN: usize;
    /// Number of rounds `Nr`.
    const ROUNDS: usize;
    /// Display name, e.g. `AES-128`.
    const NAME: &'static str;
    /// Length of the flattened round-key schedule in bytes.
    const EXPANDED_LEN: usize = (Self::ROUNDS + 1) * BLOCK_LEN;

    /// Raw key storage.
    type KeyBytes: Copy + Default + AsRef<[u8]> + AsMut<[u8]> + Zeroize + Send + Sync;
    /// Round-key storage: exactly `ROUNDS + 1` blocks.
    type Schedule: Clone + Default + AsRef<[Block]> + AsMut<[Block]> + Zeroize + Send + Sync;
}

/// AES with a 128-bit key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aes128 {}

/// AES with a 192-bit key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aes192 {}

/// AES with a 256-bit key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aes256 {}

macro_rules! key_size {
    ($ty:ty, $len:literal, $rounds:literal, $name:literal) => {
        impl sealed::Sealed for $ty {}

        impl KeySize for $ty {
            const KEY_LEN: usize = $len;
            const ROUNDS: usize = $rounds;
            const NAME: &'static str = $name;

            type KeyBytes = [u8; $len];
            type Schedule = [Block; $rounds + 1];
        }

        impl From<[u8; $len]> for CipherKey<$ty> {
            fn from(value: [u8; $len]) -> Self {
                Self::new(value)
            }
        }
    };
}

key_size!(Aes128, 16, 10, "AES-128");
key_size!(Aes192, 24, 12, "AES-192");
key_size!(Aes256, 32, 14, "AES-256");

/// A key slice did not match the key size it was loaded for.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("{name} key must be {expected} bytes, got {actual}")]
pub struct KeyLengthError {
    /// Name of the requested variant.
    pub name: &'static str,
    /// Required length in bytes.
    pub expected: usize,
    /// Length that was supplied.
    pub actual: usize,
}

/// AES key of the size selected by `K`. Wiped on drop.
pub struct CipherKey<K: KeySize> {
    bytes: K::KeyBytes,
}

impl<K: KeySize> CipherKey<K> {
    /// Wraps raw key bytes.
    pub fn new(bytes: K::KeyBytes) -> Self {
        Self { bytes }
    }

    /// Raw key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<K: KeySize> TryFrom<&[u8]> for CipherKey<K> {
    type Error = KeyLengthError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != K::KEY_LEN {
            return Err(KeyLengthError {
                name: K::NAME,
                expected: K::KEY_LEN,
                actual: value.len(),
            });
        }
        let mut bytes = K::KeyBytes::default();
        bytes.as_mut().copy_from_slice(value);
        Ok(Self { bytes })
    }
}

impl<K: KeySize> Clone for CipherKey<K> {
    fn clone(&self) -> Self {
        Self { bytes: self.bytes }
    }
}

impl<K: KeySize> fmt::Debug for CipherKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherKey")
            .field("variant", &K::NAME)
            .finish_non_exhaustive()
    }
}

impl<K: KeySize> Drop for CipherKey<K> {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Expanded round keys: `K::ROUNDS + 1` blocks. Wiped on drop.
pub struct RoundKeys<K: KeySize> {
    schedule: K::Schedule,
}

impl<K: KeySize> RoundKeys<K> {
    pub(crate) fn from_schedule(schedule: K::Schedule) -> Self {
        debug_assert_eq!(schedule.as_ref().len(), K::ROUNDS + 1);
        Self { schedule }
    }

    /// Returns the round key at the requested index (`0..=K::ROUNDS`).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.schedule.as_ref()[round]
    }

    /// All round keys in order.
    #[inline]
    pub fn as_blocks(&self) -> &[Block] {
        self.schedule.as_ref()
    }

    /// Iterates the flattened schedule, `K::EXPANDED_LEN` bytes in total.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.as_blocks().iter().flatten().copied()
    }
}

impl<K: KeySize> Clone for RoundKeys<K> {
    fn clone(&self) -> Self {
        Self {
            schedule: self.schedule.clone(),
        }
    }
}

impl<K: KeySize> fmt::Debug for RoundKeys<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundKeys")
            .field("variant", &K::NAME)
            .field("round_keys", &self.as_blocks().len())
            .finish_non_exhaustive()
    }
}

impl<K: KeySize> Drop for RoundKeys<K> {
    fn drop(&mut self) {
        self.schedule.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expanded_lengths_follow_key_length() {
        assert_eq!(Aes128::EXPANDED_LEN, 176);
        assert_eq!(Aes192::EXPANDED_LEN, 208);
        assert_eq!(Aes256::EXPANDED_LEN, 240);
    }

    #[test]
    fn try_from_rejects_wrong_length() {
        let err = CipherKey::<Aes192>::try_from(&[0u8; 16][..]).unwrap_err();
        assert_eq!(
            err,
            KeyLengthError {
                name: "AES-192",
                expected: 24,
                actual: 16
            }
        );
        assert_eq!(err.to_string(), "AES-192 key must be 24 bytes, got 16");
    }

    #[test]
    fn try_from_copies_bytes() {
        let raw: Vec<u8> = (0..32).collect();
        let key = CipherKey::<Aes256>::try_from(raw.as_slice()).unwrap();
        assert_eq!(key.as_bytes(), raw.as_slice());
    }

    #[test]
    fn debug_hides_key_material() {
        let key = CipherKey::<Aes128>::from([0xab; 16]);
        let rendered = format!("{key:?}");
        assert!(rendered.contains("AES-128"));
        assert!(!rendered.to_lowercase().contains("ab, "));
        assert!(!rendered.contains("171"));
    }
}
