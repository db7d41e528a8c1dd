//! Keystream command-line front end.
//!
//! Thin glue over `keystream-core`: commands take a parsed configuration and
//! an output sink, so they run the same under `main` and in tests.
//!
//! ```text
//! keystream
//!   ├─ derive   (one-shot, chunked reader, or self-describing record)
//!   └─ list     (PRF registry)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;

use std::{ffi::OsString, fmt, io::Write};

pub use error::CliError;
use keystream_core::{DeriveParams, KdfError, Reader, Zeroizing, derive, derive_record};

/// Configuration for `keystream derive`.
#[derive(Clone, Default)]
pub struct DeriveConfig {
    /// Passphrase as received from the command line.
    pub passphrase: OsString,
    /// Salt as received from the command line.
    pub salt: OsString,
    /// Output length in bytes.
    pub length: usize,
    /// Iteration count and PRF.
    pub params: DeriveParams,
    /// Read sizes for the streaming reader, cycled until `length` is reached.
    /// Empty means one-shot derivation.
    pub chunks: Vec<usize>,
    /// Print the self-describing record instead of the bare key.
    pub record: bool,
}

impl fmt::Debug for DeriveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeriveConfig")
            .field("passphrase", &"<redacted>")
            .field("salt", &self.salt)
            .field("length", &self.length)
            .field("params", &self.params)
            .field("chunks", &self.chunks)
            .field("record", &self.record)
            .finish()
    }
}

/// Run `keystream derive`, writing hex output to `out`.
pub fn run_derive(config: &DeriveConfig, out: &mut impl Write) -> Result<(), CliError> {
    let passphrase = config.passphrase.as_os_str();
    let salt = config.salt.as_os_str();

    if config.record {
        let record = derive_record(passphrase, salt, config.length, &config.params)?;
        writeln!(out, "key: {}", hex::encode(&record.key))?;
        writeln!(out, "salt: {}", hex::encode(&record.salt))?;
        writeln!(out, "length: {}", record.length)?;
        writeln!(out, "iterations: {}", record.iterations)?;
        writeln!(out, "prf: {}", record.prf)?;
        return Ok(());
    }

    let key = if config.chunks.is_empty() {
        derive(passphrase, salt, config.length, &config.params)?
    } else {
        read_chunked(config)?
    };

    writeln!(out, "{}", hex::encode(&key[..]))?;
    Ok(())
}

/// Pull `config.length` bytes through a [`Reader`] using the configured
/// read sizes. The final read is shortened to land exactly on `length`.
fn read_chunked(config: &DeriveConfig) -> Result<Zeroizing<Vec<u8>>, CliError> {
    if config.length == 0 {
        return Err(KdfError::InvalidInput { what: "dk_len", value: 0 }.into());
    }

    let mut reader =
        Reader::new(config.passphrase.as_os_str(), config.salt.as_os_str(), &config.params)?;
    let mut key = Zeroizing::new(Vec::with_capacity(config.length));

    for &chunk in config.chunks.iter().cycle() {
        let remaining = config.length - key.len();
        if remaining == 0 {
            break;
        }
        key.extend_from_slice(&reader.read(chunk.min(remaining))?);
        tracing::debug!(chunk, position = key.len(), "read chunk");
    }

    reader.close();
    Ok(key)
}

/// Run `keystream list`, writing one registry entry per line.
pub fn run_list(out: &mut impl Write) -> Result<(), CliError> {
    for entry in keystream_prf::entries() {
        let marker = if entry.name == keystream_prf::DEFAULT_PRF { " (default)" } else { "" };
        writeln!(
            out,
            "{:<14} {:<20} {:>2} bytes{marker}",
            entry.name,
            entry.oid,
            entry.prf.output_len()
        )?;
    }
    Ok(())
}
