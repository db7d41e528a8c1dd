//! Property tests for registered PRFs.
//!
//! Every registry entry must behave like a PRF: deterministic, fixed-length,
//! and sensitive to both key and message.

use keystream_prf::{Prf, entries, lookup};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_deterministic_and_fixed_length(
        key in prop::collection::vec(any::<u8>(), 0..200),
        message in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        for entry in entries() {
            let a = entry.prf.compute(&key, &message).expect("compute");
            let b = entry.prf.compute(&key, &message).expect("compute");

            prop_assert_eq!(&a, &b, "{} is not deterministic", entry.name);
            prop_assert_eq!(a.len(), entry.prf.output_len(), "{} length mismatch", entry.name);
        }
    }

    #[test]
    fn prop_message_sensitivity(
        key in prop::collection::vec(any::<u8>(), 1..64),
        message in prop::collection::vec(any::<u8>(), 1..64),
        flip in any::<prop::sample::Index>(),
    ) {
        let mut altered = message.clone();
        let i = flip.index(altered.len());
        altered[i] ^= 0x01;

        for entry in entries() {
            let a = entry.prf.compute(&key, &message).expect("compute");
            let b = entry.prf.compute(&key, &altered).expect("compute");
            prop_assert_ne!(a, b, "{} ignored a message bit", entry.name);
        }
    }
}

#[test]
fn name_and_oid_resolve_to_same_capability() {
    for entry in entries() {
        let by_name = lookup(entry.name).expect("name lookup");
        let by_oid = lookup(entry.oid).expect("oid lookup");

        let a = by_name.prf.compute(b"k", b"m").expect("compute");
        let b = by_oid.prf.compute(b"k", b"m").expect("compute");
        assert_eq!(a, b, "{} vs {}", entry.name, entry.oid);
    }
}
