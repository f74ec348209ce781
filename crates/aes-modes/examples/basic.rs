//! Encrypts a message with CBC and CTR under AES-256 and decrypts it again.

use aes_modes::{Aes256, Cipher, CipherKey, Context, Mode};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn main() -> aes_modes::Result<()> {
    // Deterministic seed for reproducibility in the example.
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    let mut key_bytes = [0u8; 32];
    let mut iv = [0u8; 16];
    rng.fill_bytes(&mut key_bytes);
    rng.fill_bytes(&mut iv);
    let key = CipherKey::<Aes256>::from(key_bytes);

    // CBC needs whole blocks: 32 bytes here.
    let message = *b"two blocks of secret text here!!";
    let mut buf = message;
    Context::with_iv(&key, iv).cbc_encrypt(&mut buf)?;
    println!("CBC ciphertext: {}", hex::encode(buf));
    Context::with_iv(&key, iv).cbc_decrypt(&mut buf)?;
    assert_eq!(buf, message);

    // CTR takes any length and uses the same call both ways.
    let cipher = Cipher::with_iv(key, iv);
    let ct = cipher.encrypt(Mode::Ctr, b"short")?;
    println!("CTR ciphertext: {}", hex::encode(&ct));
    assert_eq!(cipher.decrypt(Mode::Ctr, &ct)?, b"short");

    println!("example succeeded; both modes round-trip");
    Ok(())
}
