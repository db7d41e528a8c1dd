//! HMAC-based PRFs over the SHA-1 and SHA-2 families.

use hmac::{Hmac, Mac, digest::KeyInit};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

use crate::{Prf, PrfError};

/// HMAC over one of the supported hash functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HmacAlgorithm {
    /// HMAC-SHA-1 (RFC 2104), 20-byte output.
    Sha1,
    /// HMAC-SHA-224, 28-byte output.
    Sha224,
    /// HMAC-SHA-256, 32-byte output.
    Sha256,
    /// HMAC-SHA-384, 48-byte output.
    Sha384,
    /// HMAC-SHA-512, 64-byte output.
    Sha512,
}

impl HmacAlgorithm {
    /// All supported algorithms, weakest digest first.
    pub const ALL: [Self; 5] = [Self::Sha1, Self::Sha224, Self::Sha256, Self::Sha384, Self::Sha512];

    /// Registry friendly name.
    pub const fn friendly_name(self) -> &'static str {
        match self {
            Self::Sha1 => "HMAC_SHA1",
            Self::Sha224 => "HMAC_SHA2_224",
            Self::Sha256 => "HMAC_SHA2_256",
            Self::Sha384 => "HMAC_SHA2_384",
            Self::Sha512 => "HMAC_SHA2_512",
        }
    }

    /// PKCS#5 / RFC 8018 algorithm OID.
    pub const fn oid(self) -> &'static str {
        match self {
            Self::Sha1 => "1.2.840.113549.2.7",
            Self::Sha224 => "1.2.840.113549.2.8",
            Self::Sha256 => "1.2.840.113549.2.9",
            Self::Sha384 => "1.2.840.113549.2.10",
            Self::Sha512 => "1.2.840.113549.2.11",
        }
    }

    /// Digest output length in bytes.
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl Prf for HmacAlgorithm {
    fn name(&self) -> &str {
        self.friendly_name()
    }

    fn output_len(&self) -> usize {
        self.digest_len()
    }

    fn compute(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, PrfError> {
        let algorithm = self.friendly_name();
        match self {
            Self::Sha1 => mac::<Hmac<Sha1>>(algorithm, key, message),
            Self::Sha224 => mac::<Hmac<Sha224>>(algorithm, key, message),
            Self::Sha256 => mac::<Hmac<Sha256>>(algorithm, key, message),
            Self::Sha384 => mac::<Hmac<Sha384>>(algorithm, key, message),
            Self::Sha512 => mac::<Hmac<Sha512>>(algorithm, key, message),
        }
    }
}

/// One-shot MAC computation.
///
/// HMAC accepts keys of any length, so `InvalidKey` is unreachable for the
/// algorithms above; it is still surfaced rather than unwrapped.
fn mac<M>(algorithm: &'static str, key: &[u8], message: &[u8]) -> Result<Vec<u8>, PrfError>
where
    M: Mac + KeyInit,
{
    let mut mac =
        <M as Mac>::new_from_slice(key).map_err(|_| PrfError::InvalidKey { algorithm })?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    // RFC 2202 test case 2
    #[test]
    fn hmac_sha1_known_answer() {
        let out = HmacAlgorithm::Sha1.compute(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(out, hex!("effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"));
    }

    // RFC 4231 test case 2
    #[test]
    fn hmac_sha256_known_answer() {
        let out = HmacAlgorithm::Sha256.compute(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            out,
            hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
        );
    }

    #[test]
    fn output_matches_declared_length() {
        for alg in HmacAlgorithm::ALL {
            let out = alg.compute(b"key", b"message").unwrap();
            assert_eq!(out.len(), alg.output_len(), "{alg:?}");
        }
    }

    #[test]
    fn empty_key_and_message_accepted() {
        for alg in HmacAlgorithm::ALL {
            assert!(alg.compute(b"", b"").is_ok(), "{alg:?}");
        }
    }

    #[test]
    fn long_key_accepted() {
        // Longer than every block size: hashed down by HMAC
        let key = [0x5a; 300];
        for alg in HmacAlgorithm::ALL {
            assert_eq!(alg.compute(&key, b"m").unwrap().len(), alg.digest_len());
        }
    }

    #[test]
    fn name_is_friendly_name() {
        assert_eq!(HmacAlgorithm::Sha384.name(), "HMAC_SHA2_384");
    }
}
