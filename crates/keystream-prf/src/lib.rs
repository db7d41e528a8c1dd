//! Keystream Pseudorandom Functions
//!
//! This crate provides the PRF capabilities that the key-stream core threads
//! bytes through. The core never computes a digest itself; it only calls
//! [`Prf::compute`].
//!
//! # Design
//!
//! A PRF is a keyed, deterministic function with a fixed output length. All
//! implementations in this crate are stateless, so a single value can be
//! shared between threads and used by any number of concurrent derivations.
//!
//! ```text
//! identifier ("HMAC_SHA2_256" | "1.2.840.113549.2.9")
//!        │
//!        ▼
//! registry::lookup → &'static dyn Prf
//!        │
//!        ▼
//! Prf::compute(key, message) → hlen bytes
//! ```
//!
//! # Registry
//!
//! The registry is a static table built at compile time. It is never mutated,
//! so lookups need no synchronization.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod algorithm;
pub mod error;
pub mod registry;

use std::fmt;

pub use algorithm::HmacAlgorithm;
pub use error::PrfError;
pub use registry::{DEFAULT_PRF, RegistryEntry, entries, lookup};

/// A keyed pseudorandom function with a fixed output length.
///
/// # Invariants
///
/// - Determinism: the same `(key, message)` always yields the same output
/// - Fixed length: every successful `compute` returns exactly `output_len()`
///   bytes
/// - Statelessness: `compute` must not depend on or mutate shared state, so
///   implementations can be invoked concurrently
pub trait Prf: Send + Sync + fmt::Debug {
    /// Identifier used in self-describing derivation records.
    fn name(&self) -> &str;

    /// Output length in bytes (`hlen`).
    fn output_len(&self) -> usize;

    /// Apply the PRF to `message` under `key`.
    fn compute(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, PrfError>;
}
