//! Keystream Core
//!
//! PBKDF2 (RFC 8018 §5.2) as an infinite key stream. A passphrase, salt,
//! iteration count and PRF define a byte stream; callers take a fixed-length
//! prefix with [`derive`] or pull it incrementally with [`Reader`].
//!
//! # Architecture
//!
//! ```text
//! Material ──text_to_bytes──► passphrase, salt
//! DeriveParams ──resolve────► Iterations, PrfHandle
//!                                   │
//!                                   ▼
//!                          block(index) = F(P, S, c, i)
//!                             │                 │
//!                             ▼                 ▼
//!                          derive()          Reader::read()
//!                     (one-shot, truncate) (buffered, resumable)
//! ```
//!
//! # Invariants
//!
//! - Prefix stability: `derive(.., n)` is a prefix of `derive(.., m)` for
//!   `n < m`
//! - Equivalence: reads totalling `N` bytes equal `derive(.., N)`
//! - No partial success: failed calls return nothing and leave readers
//!   untouched
//!
//! # Concurrency
//!
//! Everything here is synchronous and CPU-bound. Derivations share no mutable
//! state, so independent calls and readers may run on different threads.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod block;
mod derive;
pub mod encoding;
pub mod error;
pub mod params;
pub mod prf;
pub mod reader;
pub mod record;

pub use block::{MAX_BLOCK_INDEX, block};
pub use derive::{derive, derive_record};
pub use encoding::{Material, text_to_bytes, uint_to_be_bytes};
pub use error::{KdfError, Result};
pub use keystream_prf::{DEFAULT_PRF, HmacAlgorithm, Prf, PrfError};
pub use params::{DEFAULT_ITERATIONS, DeriveParams, Iterations};
pub use prf::{PrfHandle, PrfSelector};
pub use reader::Reader;
pub use record::DerivedKeyRecord;
pub use zeroize::Zeroizing;
