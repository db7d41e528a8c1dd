//! Keystream binary.
//!
//! # Usage
//!
//! ```bash
//! # 32-byte key, HMAC-SHA-256, 1000 iterations
//! keystream derive --passphrase password --salt salt --length 32
//!
//! # RFC 6070 vector through the streaming reader, 7 bytes at a time
//! keystream derive --passphrase password --salt salt --length 20 \
//!     --iterations 1 --prf HMAC_SHA1 --chunk 7
//!
//! # Registered PRFs
//! keystream list
//! ```

use std::{ffi::OsString, io};

use clap::{Parser, Subcommand};
use keystream_cli::{DeriveConfig, run_derive, run_list};
use keystream_core::{DEFAULT_ITERATIONS, DEFAULT_PRF, DeriveParams};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// PBKDF2 key derivation
#[derive(Parser, Debug)]
#[command(name = "keystream")]
#[command(about = "Derive PBKDF2 key material as a one-shot key or a stream")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive a key and print it as lowercase hex
    Derive {
        /// Passphrase (must be valid UTF-8)
        #[arg(short, long)]
        passphrase: OsString,

        /// Salt (must be valid UTF-8)
        #[arg(short, long)]
        salt: OsString,

        /// Output length in bytes
        #[arg(short, long)]
        length: usize,

        /// PBKDF2 iteration count
        #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: u64,

        /// PRF friendly name or OID
        #[arg(long, default_value = DEFAULT_PRF)]
        prf: String,

        /// Read through the streaming reader in chunks of this size (repeatable)
        #[arg(long = "chunk", conflicts_with = "record")]
        chunks: Vec<usize>,

        /// Print the key together with the parameters that produced it
        #[arg(long)]
        record: bool,
    },

    /// List registered PRFs
    List,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let mut out = io::stdout().lock();

    let result = match args.command {
        Command::Derive { passphrase, salt, length, iterations, prf, chunks, record } => {
            let config = DeriveConfig {
                passphrase,
                salt,
                length,
                params: DeriveParams::new().with_iterations(iterations).with_prf(prf),
                chunks,
                record,
            };
            tracing::debug!(?config, "deriving");
            run_derive(&config, &mut out)
        },
        Command::List => run_list(&mut out),
    };

    if let Err(err) = &result {
        tracing::error!("{err}");
    }

    result?;

    Ok(())
}
