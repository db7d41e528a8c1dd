//! PRF error types.

use thiserror::Error;

/// Errors from PRF evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrfError {
    /// The MAC rejected the key.
    #[error("invalid key for {algorithm}")]
    InvalidKey {
        /// Algorithm that rejected the key.
        algorithm: &'static str,
    },

    /// The PRF returned a different number of bytes than it declared.
    #[error("PRF output length mismatch: expected {expected}, got {actual}")]
    OutputLength {
        /// Declared output length.
        expected: usize,
        /// Length actually returned.
        actual: usize,
    },

    /// A custom PRF implementation failed.
    #[error("PRF failed: {reason}")]
    Failed {
        /// Description of the failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_length_display() {
        let err = PrfError::OutputLength { expected: 32, actual: 20 };
        assert_eq!(err.to_string(), "PRF output length mismatch: expected 32, got 20");
    }

    #[test]
    fn invalid_key_display() {
        let err = PrfError::InvalidKey { algorithm: "HMAC_SHA1" };
        assert_eq!(err.to_string(), "invalid key for HMAC_SHA1");
    }
}
