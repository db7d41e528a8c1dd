//! Streaming key reader.
//!
//! A [`Reader`] yields the same byte stream as [`derive`](crate::derive()), one
//! read at a time. Bytes generated but not yet returned are buffered between
//! reads.
//!
//! # State Machine
//!
//! ```text
//!   new() ──► Open ──close()/drop──► Closed
//!              │ ▲
//!              └─┘ read(n)
//! ```
//!
//! # Invariants
//!
//! - Equivalence: reads totalling `N` bytes concatenate to
//!   `derive(passphrase, salt, N, params)`
//! - Bounded buffer: after every successful read, fewer than `hlen` bytes are
//!   buffered
//! - Atomic reads: a failed read consumes nothing and does not advance the
//!   block index
//! - Terminal close: `Closed` has no outgoing transition; passphrase, salt and
//!   buffered bytes are zeroed when the open state is dropped

use std::{fmt, io};

use zeroize::Zeroizing;

use crate::{
    block::{MAX_BLOCK_INDEX, block},
    derive::blocks_needed,
    encoding::{Material, text_to_bytes},
    error::{KdfError, Result},
    params::{DeriveParams, Resolved},
};

/// State owned by an open reader.
struct OpenState {
    passphrase: Zeroizing<Vec<u8>>,
    salt: Zeroizing<Vec<u8>>,
    params: Resolved,
    /// Index of the next block to generate (1-based).
    next_index: u64,
    /// Generated bytes not yet returned.
    leftover: Zeroizing<Vec<u8>>,
    /// Total bytes returned so far.
    position: u64,
}

enum State {
    Open(OpenState),
    Closed,
}

/// Incremental PBKDF2 key stream.
///
/// Not synchronized: `read` and `close` take `&mut self`, so sharing one
/// reader between threads requires external locking.
pub struct Reader {
    state: State,
}

impl Reader {
    /// Create a reader positioned at the start of the stream.
    ///
    /// Validates parameters the same way as [`derive`](crate::derive()).
    pub fn new<'p, 's>(
        passphrase: impl Into<Material<'p>>,
        salt: impl Into<Material<'s>>,
        params: &DeriveParams,
    ) -> Result<Self> {
        let passphrase = text_to_bytes(passphrase.into())?;
        let salt = text_to_bytes(salt.into())?;
        let params = params.resolve()?;

        tracing::debug!(
            iterations = params.iterations.get(),
            prf = params.prf.identifier(),
            "opened key stream"
        );

        Ok(Self {
            state: State::Open(OpenState {
                passphrase,
                salt,
                params,
                next_index: 1,
                leftover: Zeroizing::new(Vec::new()),
                position: 0,
            }),
        })
    }

    /// Read the next `n` bytes of the stream.
    ///
    /// # Errors
    ///
    /// - `StreamClosed` after [`close`](Self::close)
    /// - `InvalidInput` if `n` is zero
    /// - `DerivedKeyTooLong` if the read would need a block index past
    ///   `2^32 - 1`
    /// - `Prf` if the PRF fails
    ///
    /// On error the reader is unchanged.
    pub fn read(&mut self, n: usize) -> Result<Zeroizing<Vec<u8>>> {
        let State::Open(open) = &self.state else {
            return Err(KdfError::StreamClosed);
        };
        open.check_read(n)?;

        let mut out = Zeroizing::new(vec![0u8; n]);
        self.read_into(&mut out)?;
        Ok(out)
    }

    /// Fill `buf` with the next `buf.len()` bytes of the stream.
    ///
    /// Same semantics as [`read`](Self::read) with `n = buf.len()`.
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        let State::Open(open) = &mut self.state else {
            return Err(KdfError::StreamClosed);
        };

        let n = buf.len();
        let fresh = open.generate(n)?;

        // Commit: nothing below can fail
        let mut available = Zeroizing::new(Vec::with_capacity(open.leftover.len() + fresh.len()));
        available.extend_from_slice(&open.leftover);
        available.extend_from_slice(&fresh);

        buf.copy_from_slice(&available[..n]);
        open.leftover = Zeroizing::new(available[n..].to_vec());
        open.position = open.position.saturating_add(n as u64);

        debug_assert!(open.leftover.len() < open.params.prf.output_len());

        Ok(())
    }

    /// Close the stream, releasing and zeroing all secret material.
    ///
    /// Idempotent.
    pub fn close(&mut self) {
        if let State::Open(open) = std::mem::replace(&mut self.state, State::Closed) {
            tracing::debug!(
                position = open.position,
                blocks = open.next_index - 1,
                "closed key stream"
            );
        }
    }

    /// Returns true once the reader has been closed.
    pub fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed)
    }

    /// Total bytes returned so far, or `None` once closed.
    pub fn position(&self) -> Option<u64> {
        match &self.state {
            State::Open(open) => Some(open.position),
            State::Closed => None,
        }
    }

    /// PRF output length (`hlen`), or `None` once closed.
    pub fn output_len(&self) -> Option<usize> {
        match &self.state {
            State::Open(open) => Some(open.params.prf.output_len()),
            State::Closed => None,
        }
    }
}

impl OpenState {
    /// Validate a read of `n` bytes without touching any state.
    ///
    /// Returns the last block index the read needs, or `None` if the buffer
    /// already covers it.
    fn check_read(&self, n: usize) -> Result<Option<u64>> {
        if n == 0 {
            return Err(KdfError::InvalidInput { what: "read length", value: 0 });
        }

        let missing = n.saturating_sub(self.leftover.len());
        if missing == 0 {
            return Ok(None);
        }

        let count = blocks_needed(missing, self.params.prf.output_len())?;
        let last = self.next_index + count - 1;
        if last > MAX_BLOCK_INDEX {
            return Err(KdfError::DerivedKeyTooLong { block_index: MAX_BLOCK_INDEX + 1 });
        }
        Ok(Some(last))
    }

    /// Generate enough whole blocks to serve a read of `n` bytes.
    ///
    /// Blocks are staged in a scratch buffer and `next_index` is advanced only
    /// once all of them succeed.
    fn generate(&mut self, n: usize) -> Result<Zeroizing<Vec<u8>>> {
        let Some(last) = self.check_read(n)? else {
            return Ok(Zeroizing::new(Vec::new()));
        };

        let hlen = self.params.prf.output_len();
        let blocks = usize::try_from(last + 1 - self.next_index).unwrap_or(usize::MAX);
        let mut staged = Zeroizing::new(Vec::with_capacity(blocks.saturating_mul(hlen)));
        for index in self.next_index..=last {
            let t =
                block(&self.passphrase, &self.salt, self.params.iterations, &*self.params.prf, index)?;
            staged.extend_from_slice(&t);
        }

        self.next_index = last + 1;
        Ok(staged)
    }
}

impl Drop for Reader {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Open(open) => f
                .debug_struct("Reader")
                .field("state", &"Open")
                .field("prf", &open.params.prf.identifier())
                .field("iterations", &open.params.iterations.get())
                .field("next_index", &open.next_index)
                .field("buffered", &open.leftover.len())
                .field("position", &open.position)
                .finish(),
            State::Closed => f.debug_struct("Reader").field("state", &"Closed").finish(),
        }
    }
}

impl io::Read for Reader {
    /// Fill `buf` completely from the key stream.
    ///
    /// The stream never ends while open, so a non-empty buffer is always
    /// filled; an empty buffer reads zero bytes.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        self.read_into(buf).map_err(|e| match e {
            KdfError::StreamClosed => io::Error::new(io::ErrorKind::BrokenPipe, e),
            KdfError::Prf(_) => io::Error::other(e),
            _ => io::Error::new(io::ErrorKind::InvalidInput, e),
        })?;

        Ok(buf.len())
    }
}
