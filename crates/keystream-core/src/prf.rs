//! PRF selection.
//!
//! Callers pick a PRF either by registry identifier (friendly name or OID) or
//! by handing over a capability directly. Both resolve to a [`PrfHandle`].

use std::{fmt, ops::Deref, sync::Arc};

use keystream_prf::{DEFAULT_PRF, HmacAlgorithm, Prf, RegistryEntry};

use crate::error::{KdfError, Result};

/// How the caller names the PRF.
#[derive(Clone)]
pub enum PrfSelector {
    /// Registry friendly name or OID.
    Named(String),
    /// A capability supplied directly.
    Direct(Arc<dyn Prf>),
}

impl PrfSelector {
    /// Resolve to a usable capability.
    pub fn resolve(&self) -> Result<PrfHandle> {
        let handle = match self {
            Self::Named(identifier) => keystream_prf::lookup(identifier)
                .map(PrfHandle::Registered)
                .ok_or_else(|| KdfError::UnknownPrf { identifier: identifier.clone() })?,
            Self::Direct(prf) => PrfHandle::Custom(Arc::clone(prf)),
        };

        if handle.output_len() == 0 {
            return Err(KdfError::InvalidInput { what: "PRF output length", value: 0 });
        }

        Ok(handle)
    }
}

impl Default for PrfSelector {
    fn default() -> Self {
        Self::Named(DEFAULT_PRF.to_string())
    }
}

impl fmt::Debug for PrfSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(identifier) => f.debug_tuple("Named").field(identifier).finish(),
            Self::Direct(prf) => f.debug_tuple("Direct").field(&prf.name()).finish(),
        }
    }
}

impl From<&str> for PrfSelector {
    fn from(identifier: &str) -> Self {
        Self::Named(identifier.to_string())
    }
}

impl From<String> for PrfSelector {
    fn from(identifier: String) -> Self {
        Self::Named(identifier)
    }
}

impl From<HmacAlgorithm> for PrfSelector {
    fn from(algorithm: HmacAlgorithm) -> Self {
        Self::Direct(Arc::new(algorithm))
    }
}

impl From<Arc<dyn Prf>> for PrfSelector {
    fn from(prf: Arc<dyn Prf>) -> Self {
        Self::Direct(prf)
    }
}

/// A resolved PRF capability.
#[derive(Debug, Clone)]
pub enum PrfHandle {
    /// Entry from the static registry.
    Registered(&'static RegistryEntry),
    /// Caller-supplied capability.
    Custom(Arc<dyn Prf>),
}

impl PrfHandle {
    /// Identifier recorded in derivation metadata.
    ///
    /// Registry PRFs report their friendly name, custom PRFs their own name.
    pub fn identifier(&self) -> &str {
        match self {
            Self::Registered(entry) => entry.name,
            Self::Custom(prf) => prf.name(),
        }
    }
}

impl Deref for PrfHandle {
    type Target = dyn Prf;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Registered(entry) => entry.prf,
            Self::Custom(prf) => prf.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use keystream_prf::PrfError;

    use super::*;

    #[derive(Debug)]
    struct Empty;

    impl Prf for Empty {
        fn name(&self) -> &str {
            "EMPTY"
        }

        fn output_len(&self) -> usize {
            0
        }

        fn compute(&self, _key: &[u8], _message: &[u8]) -> std::result::Result<Vec<u8>, PrfError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn default_resolves_to_hmac_sha256() {
        let handle = PrfSelector::default().resolve().unwrap();
        assert_eq!(handle.identifier(), "HMAC_SHA2_256");
        assert_eq!(handle.output_len(), 32);
    }

    #[test]
    fn named_by_oid_reports_friendly_name() {
        let handle = PrfSelector::from("1.2.840.113549.2.11").resolve().unwrap();
        assert_eq!(handle.identifier(), "HMAC_SHA2_512");
    }

    #[test]
    fn unknown_name_rejected() {
        let err = PrfSelector::from("HMAC_WHIRLPOOL").resolve().unwrap_err();
        assert_eq!(err, KdfError::UnknownPrf { identifier: "HMAC_WHIRLPOOL".to_string() });
    }

    #[test]
    fn direct_capability_uses_own_name() {
        let handle = PrfSelector::from(HmacAlgorithm::Sha1).resolve().unwrap();
        assert!(matches!(handle, PrfHandle::Custom(_)));
        assert_eq!(handle.identifier(), "HMAC_SHA1");
    }

    #[test]
    fn zero_length_prf_rejected() {
        let selector = PrfSelector::Direct(Arc::new(Empty));
        let err = selector.resolve().unwrap_err();
        assert!(matches!(err, KdfError::InvalidInput { what: "PRF output length", .. }));
    }
}
