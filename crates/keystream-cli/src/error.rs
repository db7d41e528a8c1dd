//! CLI error types.

use keystream_core::KdfError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Derivation failed.
    #[error("derivation failed: {0}")]
    Kdf(#[from] KdfError),

    /// Writing output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
