//! Laws that hold across calls on one context.

use aes_modes::{Aes128, Aes192, Aes256, CipherKey, Context, Direction, Error, KeySize, Mode};
use proptest::prelude::*;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn ctx<K: KeySize>(key: &[u8], iv: [u8; 16]) -> Context<K> {
    Context::from_slices(key, Some(&iv[..])).unwrap()
}

/// Output of one call over `data` versus two calls split at `split`.
fn one_vs_two<K: KeySize>(
    mode: Mode,
    direction: Direction,
    key: &[u8],
    iv: [u8; 16],
    data: &[u8],
    split: usize,
) -> (Vec<u8>, Vec<u8>) {
    let mut whole = data.to_vec();
    ctx::<K>(key, iv).apply(direction, mode, &mut whole).unwrap();

    let mut parts = data.to_vec();
    let mut context = ctx::<K>(key, iv);
    let (head, tail) = parts.split_at_mut(split);
    context.apply(direction, mode, head).unwrap();
    context.apply(direction, mode, tail).unwrap();
    (whole, parts)
}

fn round_trip<K: KeySize>(mode: Mode, key: &[u8], iv: [u8; 16], data: &[u8]) {
    let mut buf = data.to_vec();
    ctx::<K>(key, iv).apply(Direction::Encrypt, mode, &mut buf).unwrap();
    ctx::<K>(key, iv).apply(Direction::Decrypt, mode, &mut buf).unwrap();
    assert_eq!(buf, data, "{} {mode}", K::NAME);
}

proptest! {
    #[test]
    fn stream_modes_continue_across_any_split(
        key in prop::array::uniform32(any::<u8>()),
        iv in prop::array::uniform16(any::<u8>()),
        data in prop::collection::vec(any::<u8>(), 0..200),
        split_seed in any::<usize>(),
    ) {
        let split = if data.is_empty() { 0 } else { split_seed % (data.len() + 1) };
        for mode in Mode::enabled().filter(|m| !m.requires_alignment()) {
            for direction in [Direction::Encrypt, Direction::Decrypt] {
                let (whole, parts) =
                    one_vs_two::<Aes128>(mode, direction, &key[..16], iv, &data, split);
                prop_assert_eq!(&whole, &parts, "AES-128 {} {}", mode, direction);
                let (whole, parts) =
                    one_vs_two::<Aes256>(mode, direction, &key, iv, &data, split);
                prop_assert_eq!(&whole, &parts, "AES-256 {} {}", mode, direction);
            }
        }
    }

    #[test]
    fn block_modes_continue_across_block_splits(
        key in prop::array::uniform24(any::<u8>()),
        iv in prop::array::uniform16(any::<u8>()),
        blocks in 0usize..12,
        split_seed in any::<usize>(),
    ) {
        let mut data = vec![0u8; blocks * 16];
        ChaCha20Rng::from_seed(key[..].repeat(2)[..32].try_into().unwrap())
            .fill_bytes(&mut data);
        let split = (split_seed % (blocks + 1)) * 16;
        for mode in Mode::enabled().filter(|m| m.requires_alignment()) {
            for direction in [Direction::Encrypt, Direction::Decrypt] {
                let (whole, parts) =
                    one_vs_two::<Aes192>(mode, direction, &key, iv, &data, split);
                prop_assert_eq!(&whole, &parts, "AES-192 {} {}", mode, direction);
            }
        }
    }

    #[test]
    fn every_mode_round_trips(
        key in prop::array::uniform32(any::<u8>()),
        iv in prop::array::uniform16(any::<u8>()),
        blocks in 0usize..8,
        tail in 0usize..16,
    ) {
        let mut rng = ChaCha20Rng::from_seed(key);
        for mode in Mode::enabled() {
            let len = blocks * 16 + if mode.requires_alignment() { 0 } else { tail };
            let mut data = vec![0u8; len];
            rng.fill_bytes(&mut data);
            round_trip::<Aes128>(mode, &key[..16], iv, &data);
            round_trip::<Aes192>(mode, &key[..24], iv, &data);
            round_trip::<Aes256>(mode, &key, iv, &data);
        }
    }
}

#[test]
fn self_inverse_modes_use_one_operation() {
    let key = CipherKey::<Aes256>::from([0x61u8; 32]);
    let iv = [0x17u8; 16];
    let plain: Vec<u8> = (0..=255).collect();
    for mode in Mode::enabled().filter(|m| m.is_self_inverse()) {
        let mut ctx = Context::with_iv(&key, iv);
        let mut buf = plain.clone();
        ctx.apply(Direction::Encrypt, mode, &mut buf).unwrap();
        ctx.set_iv(iv);
        ctx.apply(Direction::Encrypt, mode, &mut buf).unwrap();
        assert_eq!(buf, plain, "{mode}");
    }
}

#[test]
fn set_iv_discards_pending_keystream() {
    let key = CipherKey::<Aes128>::from([0x01u8; 16]);
    let iv = [0x02u8; 16];
    for mode in Mode::enabled().filter(|m| !m.requires_alignment()) {
        let mut fresh = [0u8; 16];
        Context::with_iv(&key, iv)
            .apply(Direction::Encrypt, mode, &mut fresh)
            .unwrap();

        let mut ctx = Context::with_iv(&key, iv);
        let mut partial = [0u8; 5];
        ctx.apply(Direction::Encrypt, mode, &mut partial).unwrap();
        ctx.set_iv(iv);
        let mut again = [0u8; 16];
        ctx.apply(Direction::Encrypt, mode, &mut again).unwrap();
        assert_eq!(again, fresh, "{mode}");
    }
}

#[test]
fn unaligned_rejection_leaves_context_usable() {
    let key = CipherKey::<Aes128>::from([0x0au8; 16]);
    let iv = [0x0bu8; 16];
    for mode in Mode::enabled().filter(|m| m.requires_alignment()) {
        let mut ctx = Context::with_iv(&key, iv);
        let mut bad = [0x5eu8; 24];
        assert_eq!(
            ctx.apply(Direction::Encrypt, mode, &mut bad),
            Err(Error::UnalignedBuffer { mode, len: 24 })
        );
        assert_eq!(bad, [0x5eu8; 24]);
        assert_eq!(ctx.iv(), Some(&iv));

        let mut good = [0x5eu8; 32];
        let mut expected = good;
        ctx.apply(Direction::Encrypt, mode, &mut good).unwrap();
        Context::with_iv(&key, iv)
            .apply(Direction::Encrypt, mode, &mut expected)
            .unwrap();
        assert_eq!(good, expected, "{mode}");
    }
}

#[cfg(feature = "ctr")]
#[test]
fn distinct_contexts_run_in_parallel() {
    let key = CipherKey::<Aes128>::from([0x33u8; 16]);
    let reference = {
        let mut buf = vec![0u8; 4096];
        Context::with_iv(&key, [0u8; 16]).ctr_apply(&mut buf).unwrap();
        buf
    };
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let key = key.clone();
                scope.spawn(move || {
                    let mut buf = vec![0u8; 4096];
                    Context::with_iv(&key, [0u8; 16]).ctr_apply(&mut buf).unwrap();
                    buf
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), reference);
        }
    });
}
