//! Block representation helpers.

/// Size of an AES block in bytes.
pub const BLOCK_LEN: usize = 16;

/// AES block of 16 bytes.
pub type Block = [u8; BLOCK_LEN];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Increments `counter` as a 128-bit big-endian integer, wrapping to zero.
#[inline]
pub fn increment_be(counter: &mut Block) {
    let value = u128::from_be_bytes(*counter).wrapping_add(1);
    *counter = value.to_be_bytes();
}
