//! Command-line interface for the AES block modes.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use aes_modes::{
    Aes, Aes128, Aes192, Aes256, BlockCipher, Cipher, CipherKey, Context, Direction, KeySize,
    Mode,
};
use anyhow::{bail, ensure, Context as _, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// AES block-mode CLI.
#[derive(Parser)]
#[command(
    name = "aesm",
    version,
    about = "Encrypt and decrypt with AES-128/192/256 in ECB, CBC, CFB, OFB or CTR mode"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file.
    Enc(CryptArgs),
    /// Decrypt a file.
    Dec(CryptArgs),
    /// Run known-answer tests and random round trips for every enabled mode.
    Check {
        /// Random samples per mode and key size.
        #[arg(long, default_value_t = 4)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Generate a key and IV, encrypt random data, decrypt it back.
    Demo {
        /// Mode of operation.
        #[arg(long, default_value = "ctr")]
        mode: Mode,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(clap::Args)]
struct CryptArgs {
    /// Mode of operation: ecb, cbc, cfb, ofb or ctr.
    #[arg(long)]
    mode: Mode,
    /// AES key as 32, 48 or 64 hex characters.
    #[arg(long, value_name = "HEX")]
    key_hex: String,
    /// IV or initial counter block as 32 hex characters (all modes but ECB).
    #[arg(long, value_name = "HEX")]
    iv_hex: Option<String>,
    /// Input file. ECB and CBC need a multiple of 16 bytes of plaintext.
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output file.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
    /// Encoding of the ciphertext side.
    #[arg(long, value_enum, default_value_t = Armor::Raw)]
    armor: Armor,
}

/// Text encodings for ciphertext files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Armor {
    Raw,
    Hex,
    Base64,
}

impl Armor {
    fn encode(self, bytes: &[u8]) -> Vec<u8> {
        match self {
            Armor::Raw => bytes.to_vec(),
            Armor::Hex => hex::encode(bytes).into_bytes(),
            Armor::Base64 => BASE64.encode(bytes).into_bytes(),
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<Vec<u8>> {
        match self {
            Armor::Raw => Ok(bytes.to_vec()),
            Armor::Hex => hex::decode(armored_text(bytes)?).context("decode hex ciphertext"),
            Armor::Base64 => BASE64
                .decode(armored_text(bytes)?)
                .context("decode base64 ciphertext"),
        }
    }
}

fn armored_text(bytes: &[u8]) -> Result<&str> {
    let text = std::str::from_utf8(bytes).context("armored ciphertext is not UTF-8")?;
    Ok(text.trim())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Commands::Enc(args) => cmd_crypt(Direction::Encrypt, &args),
        Commands::Dec(args) => cmd_crypt(Direction::Decrypt, &args),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Demo { mode, seed } => cmd_demo(mode, seed),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn cmd_crypt(direction: Direction, args: &CryptArgs) -> Result<()> {
    let key = parse_hex("key", &args.key_hex)?;
    let iv = args
        .iv_hex
        .as_deref()
        .map(|iv| parse_hex("IV", iv))
        .transpose()?;
    if args.mode.requires_iv() && iv.is_none() {
        bail!("{} needs --iv-hex", args.mode);
    }

    let input = read(&args.input)?;
    let data = match direction {
        Direction::Encrypt => input,
        Direction::Decrypt => args.armor.decode(&input)?,
    };
    info!(
        "{direction} {} bytes with {} ({}-bit key)",
        data.len(),
        args.mode,
        key.len() * 8
    );

    let result = crypt_with_key(direction, args.mode, &key, iv.as_deref(), &data)?;
    let output = match direction {
        Direction::Encrypt => args.armor.encode(&result),
        Direction::Decrypt => result,
    };
    fs::write(&args.output, output).with_context(|| format!("write {}", args.output.display()))
}

/// Resolves the key size once and runs the generic one-shot cipher.
fn crypt_with_key(
    direction: Direction,
    mode: Mode,
    key: &[u8],
    iv: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>> {
    match key.len() {
        16 => crypt::<Aes128>(direction, mode, key, iv, data),
        24 => crypt::<Aes192>(direction, mode, key, iv, data),
        32 => crypt::<Aes256>(direction, mode, key, iv, data),
        n => bail!("AES key must be 16, 24 or 32 bytes (32, 48 or 64 hex characters), got {n}"),
    }
}

fn crypt<K: KeySize>(
    direction: Direction,
    mode: Mode,
    key: &[u8],
    iv: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>> {
    let iv = if mode.requires_iv() { iv } else { None };
    let cipher = Cipher::<K>::from_slices(key, iv)?;
    cipher
        .crypt(direction, mode, data)
        .with_context(|| format!("{} {direction} failed", K::NAME))
}

/// FIPS-197 appendix C: key 000102..., plaintext 00112233...
const FIPS197: [(&str, &str); 3] = [
    ("000102030405060708090a0b0c0d0e0f", "69c4e0d86a7b0430d8cdb78070b4c55a"),
    (
        "000102030405060708090a0b0c0d0e0f1011121314151617",
        "dda97ca4864cdfe06eaf70a0ec0d7191",
    ),
    (
        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        "8ea2b7ca516745bfeafc49904b496089",
    ),
];
const FIPS197_PLAIN: &str = "00112233445566778899aabbccddeeff";

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    for (key_hex, cipher_hex) in FIPS197 {
        let key = parse_hex("key", key_hex)?;
        let actual = match key.len() {
            16 => known_answer::<Aes128>(&key)?,
            24 => known_answer::<Aes192>(&key)?,
            _ => known_answer::<Aes256>(&key)?,
        };
        ensure!(
            actual == cipher_hex,
            "FIPS-197 vector failed for {}-bit key: got {actual}",
            key.len() * 8
        );
    }
    println!("FIPS-197 known-answer tests: ok");

    let mut rng = seeded_rng(seed);
    for mode in Mode::enabled() {
        check_mode::<Aes128>(mode, samples, &mut rng)?;
        check_mode::<Aes192>(mode, samples, &mut rng)?;
        check_mode::<Aes256>(mode, samples, &mut rng)?;
        println!("{mode}: {samples} samples x 3 key sizes ok");
    }
    Ok(())
}

fn known_answer<K: KeySize>(key: &[u8]) -> Result<String> {
    let key = CipherKey::<K>::try_from(key)?;
    let mut block = [0u8; 16];
    hex::decode_to_slice(FIPS197_PLAIN, &mut block).context("decode plaintext")?;
    let cipher = Aes::new(&key);
    cipher.encrypt_block(&mut block);
    let encrypted = hex::encode(block);
    cipher.decrypt_block(&mut block);
    ensure!(hex::encode(block) == FIPS197_PLAIN, "{} decrypt mismatch", K::NAME);
    Ok(encrypted)
}

/// Random round trips, plus a split call that must match the single call.
fn check_mode<K: KeySize>(mode: Mode, samples: usize, rng: &mut impl RngCore) -> Result<()> {
    for _ in 0..samples {
        let mut key_bytes = K::KeyBytes::default();
        rng.fill_bytes(key_bytes.as_mut());
        let key = CipherKey::<K>::new(key_bytes);
        let mut iv = [0u8; 16];
        rng.fill_bytes(&mut iv);

        let blocks = 1 + (rng.next_u32() % 16) as usize;
        let tail = if mode.requires_alignment() {
            0
        } else {
            (rng.next_u32() % 16) as usize
        };
        let mut plain = vec![0u8; blocks * 16 + tail];
        rng.fill_bytes(&mut plain);

        let mut whole = plain.clone();
        Context::with_iv(&key, iv).apply(Direction::Encrypt, mode, &mut whole)?;

        let split = if mode.requires_alignment() {
            (blocks / 2) * 16
        } else {
            plain.len() / 2 + 1
        };
        let mut parts = plain.clone();
        let mut ctx = Context::with_iv(&key, iv);
        let (head, rest) = parts.split_at_mut(split);
        ctx.apply(Direction::Encrypt, mode, head)?;
        ctx.apply(Direction::Encrypt, mode, rest)?;
        ensure!(whole == parts, "{} {mode}: split call diverged", K::NAME);

        Context::with_iv(&key, iv).apply(Direction::Decrypt, mode, &mut whole)?;
        ensure!(whole == plain, "{} {mode}: round trip failed", K::NAME);
    }
    debug!("{} {mode}: {samples} samples passed", K::NAME);
    Ok(())
}

fn cmd_demo(mode: Mode, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key_bytes = [0u8; 32];
    rng.fill_bytes(&mut key_bytes);
    let mut iv = [0u8; 16];
    rng.fill_bytes(&mut iv);

    let len = if mode.requires_alignment() { 32 } else { 27 };
    let mut plaintext = vec![0u8; len];
    rng.fill_bytes(&mut plaintext);

    let cipher = Cipher::<Aes256>::with_iv(CipherKey::from(key_bytes), iv);
    let ciphertext = cipher.encrypt(mode, &plaintext)?;
    let decrypted = cipher.decrypt(mode, &ciphertext)?;

    println!("mode: {mode}");
    println!("demo key: {}", hex::encode(key_bytes));
    println!("iv: {}", hex::encode(iv));
    println!("plaintext: {}", hex::encode(&plaintext));
    println!("ciphertext: {}", hex::encode(&ciphertext));
    println!("decrypted: {}", hex::encode(&decrypted));
    if decrypted != plaintext {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn parse_hex(what: &str, hex_str: &str) -> Result<Vec<u8>> {
    hex::decode(hex_str.trim()).with_context(|| format!("decode {what} hex"))
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}
