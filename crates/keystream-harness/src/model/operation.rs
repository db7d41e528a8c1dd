//! Operations for model-based testing.
//!
//! Operations are generated by proptest or decoded from fuzzer input and
//! applied to both the model and the real reader.

use arbitrary::Arbitrary;
use keystream_core::{DeriveParams, HmacAlgorithm, KdfError};

/// Stream parameters, kept small so each case stays cheap.
#[derive(Debug, Clone, Arbitrary)]
pub struct StreamSetup {
    /// Index into [`HmacAlgorithm::ALL`] (taken modulo its length).
    pub algorithm: u8,
    /// Iteration selector, mapped into `1..=4`.
    pub iterations: u8,
    /// Passphrase bytes.
    pub passphrase: Vec<u8>,
    /// Salt bytes.
    pub salt: Vec<u8>,
}

impl StreamSetup {
    /// The selected PRF.
    pub fn algorithm(&self) -> HmacAlgorithm {
        HmacAlgorithm::ALL[usize::from(self.algorithm) % HmacAlgorithm::ALL.len()]
    }

    /// The iteration count, always in `1..=4`.
    pub fn iterations(&self) -> u64 {
        u64::from(self.iterations % 4) + 1
    }

    /// Derivation parameters for this setup.
    pub fn params(&self) -> DeriveParams {
        DeriveParams::new().with_iterations(self.iterations()).with_prf(self.algorithm())
    }
}

/// Operations that can be applied to a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Operation {
    /// `Reader::read(len)`.
    Read {
        /// Requested byte count. Zero is a caller error.
        len: u8,
    },

    /// `std::io::Read::read` with a buffer of `len` bytes.
    ///
    /// An empty buffer reads nothing and succeeds even on a closed stream.
    IoRead {
        /// Buffer size.
        len: u8,
    },

    /// `Reader::close()`.
    Close,
}

/// Result of applying an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Bytes produced (empty for `Close`).
    Ok(Vec<u8>),

    /// Operation failed.
    Error(OperationError),
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Check if operation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}

/// Errors observable through the reader API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    /// Stream already closed.
    StreamClosed,

    /// Zero-length read.
    InvalidLength,

    /// Block index would pass `2^32 - 1`.
    TooLong,

    /// Anything else, which neither side should produce.
    Unexpected,
}

impl From<&KdfError> for OperationError {
    fn from(err: &KdfError) -> Self {
        match err {
            KdfError::StreamClosed => Self::StreamClosed,
            KdfError::InvalidInput { .. } => Self::InvalidLength,
            KdfError::DerivedKeyTooLong { .. } => Self::TooLong,
            _ => Self::Unexpected,
        }
    }
}
