//! Derivation parameters.
//!
//! [`DeriveParams`] is the caller-facing configuration. It holds raw values;
//! validation happens once, when a derivation or reader starts, producing
//! [`Resolved`] parameters that are valid by construction.

use std::num::NonZeroU32;

use crate::{
    error::{KdfError, Result},
    prf::{PrfHandle, PrfSelector},
};

/// Iteration count used when the caller does not set one.
pub const DEFAULT_ITERATIONS: u64 = 1000;

/// Validated PBKDF2 iteration count in `[1, 2^32 - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iterations(NonZeroU32);

impl Iterations {
    /// Validate a raw iteration count.
    ///
    /// Zero is rejected as `InvalidInput`; anything above `u32::MAX` as
    /// `OutOfRange`.
    pub fn new(count: u64) -> Result<Self> {
        let narrowed = u32::try_from(count).map_err(|_| KdfError::OutOfRange {
            what: "iterations",
            value: count,
            min: 1,
            max: u64::from(u32::MAX),
        })?;

        NonZeroU32::new(narrowed)
            .map(Self)
            .ok_or(KdfError::InvalidInput { what: "iterations", value: count })
    }

    /// The count as a plain integer.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u64> for Iterations {
    type Error = KdfError;

    fn try_from(count: u64) -> Result<Self> {
        Self::new(count)
    }
}

/// Caller-facing derivation configuration.
///
/// Defaults to 1000 iterations of HMAC-SHA-256.
#[derive(Debug, Clone)]
pub struct DeriveParams {
    /// PBKDF2 iteration count.
    pub iterations: u64,
    /// PRF selection.
    pub prf: PrfSelector,
}

impl Default for DeriveParams {
    fn default() -> Self {
        Self { iterations: DEFAULT_ITERATIONS, prf: PrfSelector::default() }
    }
}

impl DeriveParams {
    /// Default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the PRF.
    #[must_use]
    pub fn with_prf(mut self, prf: impl Into<PrfSelector>) -> Self {
        self.prf = prf.into();
        self
    }

    /// Validate the iteration count and resolve the PRF.
    pub fn resolve(&self) -> Result<Resolved> {
        let iterations = Iterations::new(self.iterations)?;
        let prf = self.prf.resolve()?;
        Ok(Resolved { iterations, prf })
    }
}

/// Validated parameters.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// Iteration count.
    pub iterations: Iterations,
    /// PRF capability.
    pub prf: PrfHandle,
}
