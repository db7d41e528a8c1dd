//! Static algorithm registry.
//!
//! Maps friendly names and OIDs to PRF capabilities. The table is a `static`
//! slice, so it is populated before `main` and immutable afterwards.
//!
//! # Matching
//!
//! - Friendly names match ASCII case-insensitively (`hmac_sha2_256` works)
//! - OIDs match exactly, in dotted-decimal form

use crate::{HmacAlgorithm, Prf};

/// Friendly name of the PRF used when the caller does not pick one.
pub const DEFAULT_PRF: &str = "HMAC_SHA2_256";

/// A registered PRF.
#[derive(Debug)]
pub struct RegistryEntry {
    /// Friendly name, e.g. `HMAC_SHA2_256`.
    pub name: &'static str,
    /// Dotted-decimal OID, e.g. `1.2.840.113549.2.9`.
    pub oid: &'static str,
    /// The capability itself.
    pub prf: &'static dyn Prf,
}

impl RegistryEntry {
    /// Returns true if `identifier` names this entry.
    pub fn matches(&self, identifier: &str) -> bool {
        self.name.eq_ignore_ascii_case(identifier) || self.oid == identifier
    }
}

static REGISTRY: [RegistryEntry; 5] = [
    RegistryEntry {
        name: HmacAlgorithm::Sha1.friendly_name(),
        oid: HmacAlgorithm::Sha1.oid(),
        prf: &HmacAlgorithm::Sha1,
    },
    RegistryEntry {
        name: HmacAlgorithm::Sha224.friendly_name(),
        oid: HmacAlgorithm::Sha224.oid(),
        prf: &HmacAlgorithm::Sha224,
    },
    RegistryEntry {
        name: HmacAlgorithm::Sha256.friendly_name(),
        oid: HmacAlgorithm::Sha256.oid(),
        prf: &HmacAlgorithm::Sha256,
    },
    RegistryEntry {
        name: HmacAlgorithm::Sha384.friendly_name(),
        oid: HmacAlgorithm::Sha384.oid(),
        prf: &HmacAlgorithm::Sha384,
    },
    RegistryEntry {
        name: HmacAlgorithm::Sha512.friendly_name(),
        oid: HmacAlgorithm::Sha512.oid(),
        prf: &HmacAlgorithm::Sha512,
    },
];

/// Resolve a friendly name or OID.
pub fn lookup(identifier: &str) -> Option<&'static RegistryEntry> {
    REGISTRY.iter().find(|entry| entry.matches(identifier))
}

/// All registered PRFs, in table order.
pub fn entries() -> &'static [RegistryEntry] {
    &REGISTRY
}
