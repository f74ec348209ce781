//! Arithmetic in GF(2^8) modulo the AES polynomial x^8 + x^4 + x^3 + x + 1.

/// Low byte of the reduction polynomial.
const REDUCTION: u8 = 0x1b;

/// Multiplies `byte` by x.
#[inline(always)]
pub const fn xtime(byte: u8) -> u8 {
    // 0xff when the high bit is set, 0x00 otherwise.
    let mask = (byte >> 7).wrapping_neg();
    (byte << 1) ^ (mask & REDUCTION)
}

/// Multiplies two field elements.
///
/// Always runs eight iterations and selects with masks instead of branches.
#[inline]
pub const fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    let mut i = 0;
    while i < 8 {
        product ^= a & (b & 1).wrapping_neg();
        a = xtime(a);
        b >>= 1;
        i += 1;
    }
    product
}

/// Key-schedule round constants `x^(i-1)` for `i = 1..=10`.
pub const RCON: [u8; 10] = round_constants();

const fn round_constants() -> [u8; 10] {
    let mut rcon = [0u8; 10];
    let mut value = 1u8;
    let mut i = 0;
    while i < rcon.len() {
        rcon[i] = value;
        value = xtime(value);
        i += 1;
    }
    rcon
}
