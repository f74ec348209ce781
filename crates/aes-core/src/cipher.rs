//! AES key schedule and block encryption/decryption for all key sizes.

use core::fmt;

use zeroize::Zeroize;

use crate::block::Block;
use crate::gf::RCON;
use crate::key::{CipherKey, KeySize, RoundKeys};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;

/// Words in the largest (AES-256) schedule.
const MAX_WORDS: usize = 60;

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

/// Expands a key into `K::ROUNDS + 1` round keys.
pub fn expand_key<K: KeySize>(key: &CipherKey<K>) -> RoundKeys<K> {
    let nk = K::KEY_LEN / 4;
    let total = 4 * (K::ROUNDS + 1);

    let mut w = [0u32; MAX_WORDS];
    for (word, chunk) in w.iter_mut().zip(key.as_bytes().chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in nk..total {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp)) ^ (u32::from(RCON[i / nk - 1]) << 24);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w[i] = w[i - nk] ^ temp;
    }

    let mut schedule = K::Schedule::default();
    for (round_key, words) in schedule.as_mut().iter_mut().zip(w.chunks_exact(4)) {
        for (dst, word) in round_key.chunks_exact_mut(4).zip(words) {
            dst.copy_from_slice(&word.to_be_bytes());
        }
    }
    w.zeroize();

    RoundKeys::from_schedule(schedule)
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block<K: KeySize>(block: &Block, round_keys: &RoundKeys<K>) -> Block {
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(0));

    for round in 1..K::ROUNDS {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_keys.get(round));
    }

    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.get(K::ROUNDS));

    state
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block<K: KeySize>(block: &Block, round_keys: &RoundKeys<K>) -> Block {
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(K::ROUNDS));
    for round in (1..K::ROUNDS).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, round_keys.get(round));
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, round_keys.get(0));

    state
}

/// A 128-bit block primitive.
pub trait BlockCipher {
    /// Encrypts one block in place.
    fn encrypt_block(&self, block: &mut Block);
    /// Decrypts one block in place.
    fn decrypt_block(&self, block: &mut Block);
}

/// AES keyed with a key of size `K`; owns its expanded schedule.
pub struct Aes<K: KeySize> {
    round_keys: RoundKeys<K>,
}

impl<K: KeySize> Aes<K> {
    /// Expands `key` once.
    pub fn new(key: &CipherKey<K>) -> Self {
        Self {
            round_keys: expand_key(key),
        }
    }

    /// The expanded schedule.
    pub fn round_keys(&self) -> &RoundKeys<K> {
        &self.round_keys
    }
}

impl<K: KeySize> BlockCipher for Aes<K> {
    #[inline]
    fn encrypt_block(&self, block: &mut Block) {
        *block = encrypt_block(block, &self.round_keys);
    }

    #[inline]
    fn decrypt_block(&self, block: &mut Block) {
        *block = decrypt_block(block, &self.round_keys);
    }
}

impl<K: KeySize> Clone for Aes<K> {
    fn clone(&self) -> Self {
        Self {
            round_keys: self.round_keys.clone(),
        }
    }
}

impl<K: KeySize> fmt::Debug for Aes<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Aes").field(&K::NAME).finish()
    }
}
