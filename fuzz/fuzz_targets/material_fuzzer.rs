//! Fuzz target for passphrase and salt normalization
//!
//! Untrusted text must be validated, raw bytes must never be touched
//!
//! # Strategy
//!
//! - Arbitrary byte strings presented both as raw bytes and as text of
//!   unverified encoding
//! - Short derivations over whatever normalization accepts
//!
//! # Invariants
//!
//! - `Bytes` material passes through unchanged
//! - Unverified text is accepted iff it is valid UTF-8
//! - Text and byte forms of the same valid input derive the same key
//! - Big-endian integer encoding honors the minimum width and round-trips
//! - NEVER panic on invalid UTF-8

#![no_main]

use arbitrary::Arbitrary;
use keystream_core::{
    DeriveParams, HmacAlgorithm, KdfError, Material, derive, text_to_bytes, uint_to_be_bytes,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    passphrase: Vec<u8>,
    salt: Vec<u8>,
    number: u64,
    min_len: u8,
}

fuzz_target!(|input: FuzzInput| {
    let raw = text_to_bytes(Material::Bytes(&input.passphrase)).expect("bytes always accepted");
    assert_eq!(&raw[..], &input.passphrase[..]);

    let text = text_to_bytes(Material::RawText(&input.passphrase));
    match std::str::from_utf8(&input.passphrase) {
        Ok(_) => assert_eq!(text.map(|v| v.to_vec()), Ok(input.passphrase.clone())),
        Err(_) => assert!(matches!(text, Err(KdfError::InvalidEncoding { .. }))),
    }

    if std::str::from_utf8(&input.passphrase).is_ok() {
        let params = DeriveParams::new().with_iterations(1).with_prf(HmacAlgorithm::Sha1);
        let from_text = derive(Material::RawText(&input.passphrase), &input.salt, 24, &params);
        let from_bytes = derive(&input.passphrase, &input.salt, 24, &params);
        assert_eq!(from_text, from_bytes);
    }

    let min_len = usize::from(input.min_len % 16);
    let encoded = uint_to_be_bytes(input.number, min_len);
    assert!(encoded.len() >= min_len.max(1));
    let decoded = encoded.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
    assert_eq!(decoded, input.number);
});
