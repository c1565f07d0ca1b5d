use std::hash::Hasher;

use cityhash32::{digest32, hash32, try_digest32, City32Hasher, DigestError};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn deterministic(data in proptest::collection::vec(any::<u8>(), 0..=512)) {
        let copy = data.clone();
        prop_assert_eq!(hash32(&data), hash32(&copy));
    }

    #[test]
    fn digest32_hashes_the_prefix(
        data in proptest::collection::vec(any::<u8>(), 0..=512),
        len in any::<usize>()
    ) {
        let len = len % (data.len() + 1);
        prop_assert_eq!(digest32(&data, len), hash32(&data[..len]));
        prop_assert_eq!(try_digest32(&data, len), Ok(hash32(&data[..len])));
    }

    #[test]
    fn try_digest32_rejects_overlong_lengths(
        data in proptest::collection::vec(any::<u8>(), 0..=64),
        extra in 1usize..=1024
    ) {
        let len = data.len() + extra;
        prop_assert_eq!(
            try_digest32(&data, len),
            Err(DigestError::LengthOutOfBounds { length: len, available: data.len() })
        );
    }

    #[test]
    fn trailing_bytes_past_length_are_ignored(
        data in proptest::collection::vec(any::<u8>(), 0..=256),
        junk in proptest::collection::vec(any::<u8>(), 1..=32)
    ) {
        let mut padded = data.clone();
        padded.extend_from_slice(&junk);
        prop_assert_eq!(digest32(&padded, data.len()), hash32(&data));
    }

    #[test]
    fn hasher_matches_hash32_over_any_split(
        data in proptest::collection::vec(any::<u8>(), 0..=256),
        split in any::<usize>()
    ) {
        let split = split % (data.len() + 1);
        let mut hasher = City32Hasher::new();
        hasher.write(&data[..split]);
        hasher.write(&data[split..]);
        prop_assert_eq!(hasher.finish32(), hash32(&data));
        prop_assert_eq!(hasher.finish() as u32, hash32(&data));
    }
}

#[test]
fn error_message() {
    let err = try_digest32(b"abc", 8).unwrap_err();
    assert_eq!(err.to_string(), "digest length 8 exceeds buffer of 3 bytes");
}
