//! Derivation error types.

use keystream_prf::PrfError;
use thiserror::Error;

/// Errors from key derivation and key-stream reads.
///
/// Every variant is fatal to the call that produced it. Nothing is retried and
/// no partial output is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KdfError {
    /// A count that must be positive was zero.
    #[error("invalid input: {what} must be positive, got {value}")]
    InvalidInput {
        /// Which parameter was rejected.
        what: &'static str,
        /// The rejected value.
        value: u64,
    },

    /// Passphrase or salt text is not valid UTF-8.
    #[error("invalid encoding: {reason}")]
    InvalidEncoding {
        /// Description of the encoding failure.
        reason: String,
    },

    /// A parameter is outside its permitted range.
    #[error("{what} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        /// Which parameter was rejected.
        what: &'static str,
        /// The rejected value.
        value: u64,
        /// Smallest accepted value.
        min: u64,
        /// Largest accepted value.
        max: u64,
    },

    /// PRF identifier not found in the registry.
    #[error("unknown PRF: {identifier}")]
    UnknownPrf {
        /// The identifier that failed to resolve.
        identifier: String,
    },

    /// Output would need a block index beyond `2^32 - 1`.
    #[error("derived key too long: block index {block_index} exceeds 4294967295")]
    DerivedKeyTooLong {
        /// First block index that would be required past the limit.
        block_index: u64,
    },

    /// Read attempted on a closed key-stream reader.
    #[error("key stream is closed")]
    StreamClosed,

    /// The PRF capability failed.
    #[error("PRF error: {0}")]
    Prf(#[from] PrfError),
}

impl KdfError {
    /// Returns true if the error was caused by the caller's parameters.
    ///
    /// Parameter errors can be fixed by calling again with different
    /// arguments. `StreamClosed` and PRF failures cannot.
    pub fn is_parameter_error(&self) -> bool {
        match self {
            Self::InvalidInput { .. }
            | Self::InvalidEncoding { .. }
            | Self::OutOfRange { .. }
            | Self::UnknownPrf { .. }
            | Self::DerivedKeyTooLong { .. } => true,

            Self::StreamClosed | Self::Prf(_) => false,
        }
    }
}

/// Result type for derivation operations.
pub type Result<T> = std::result::Result<T, KdfError>;
