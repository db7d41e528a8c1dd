//! Self-describing derivation results.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// A derived key together with the parameters that reproduce it.
///
/// # Security
///
/// - **Debug Redaction**: the `Debug` impl prints the key length, never the
///   key bytes.
/// - **Zeroize on Drop**: key and salt buffers are cleared when the record is
///   dropped.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeyRecord {
    /// Derived key bytes.
    pub key: Vec<u8>,
    /// Salt the key was derived with.
    pub salt: Vec<u8>,
    /// Requested length in bytes.
    pub length: usize,
    /// PBKDF2 iteration count.
    pub iterations: u32,
    /// PRF identifier (registry friendly name or custom PRF name).
    pub prf: String,
}

impl DerivedKeyRecord {
    /// Take the key bytes, leaving the record's key empty.
    pub fn take_key(&mut self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(std::mem::take(&mut self.key))
    }
}

impl std::fmt::Debug for DerivedKeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKeyRecord")
            .field("key", &format!("<redacted {} bytes>", self.key.len()))
            .field("salt", &self.salt)
            .field("length", &self.length)
            .field("iterations", &self.iterations)
            .field("prf", &self.prf)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DerivedKeyRecord {
        DerivedKeyRecord {
            key: vec![0xaa; 32],
            salt: b"salt".to_vec(),
            length: 32,
            iterations: 1000,
            prf: "HMAC_SHA2_256".to_string(),
        }
    }

    #[test]
    fn record_cbor_roundtrip() {
        let record = sample();

        let mut bytes = Vec::new();
        ciborium::ser::into_writer(&record, &mut bytes).expect("encode");

        let decoded: DerivedKeyRecord = ciborium::de::from_reader(&bytes[..]).expect("decode");
        assert_eq!(record, decoded);
    }

    #[test]
    fn debug_redacts_key() {
        let debug = format!("{:?}", sample());
        assert!(debug.contains("<redacted 32 bytes>"));
        assert!(!debug.contains("170"), "key byte leaked: {debug}");
    }

    #[test]
    fn take_key_empties_record() {
        let mut record = sample();
        let key = record.take_key();
        assert_eq!(key.len(), 32);
        assert!(record.key.is_empty());
    }

    #[test]
    fn zeroize_clears_fields() {
        let mut record = sample();
        record.zeroize();
        assert!(record.key.is_empty());
        assert!(record.salt.is_empty());
        assert_eq!(record.iterations, 0);
    }
}
