//! Model stream - positional reference for the reader.

use keystream_core::{HmacAlgorithm, Iterations, KdfError, Prf, block};

use super::operation::{Operation, OperationError, OperationResult, StreamSetup};

/// Unbuffered reference stream.
///
/// Holds only a position and a closed flag. Every read recomputes the
/// blocks it touches from scratch.
#[derive(Debug, Clone)]
pub struct ModelStream {
    passphrase: Vec<u8>,
    salt: Vec<u8>,
    iterations: Iterations,
    prf: HmacAlgorithm,
    position: u64,
    closed: bool,
}

impl ModelStream {
    /// Open a model stream for `setup`.
    pub fn new(setup: &StreamSetup) -> Result<Self, KdfError> {
        Ok(Self {
            passphrase: setup.passphrase.clone(),
            salt: setup.salt.clone(),
            iterations: Iterations::new(setup.iterations())?,
            prf: setup.algorithm(),
            position: 0,
            closed: false,
        })
    }

    /// Bytes handed out so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Whether `Close` has been applied.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Apply an operation and return the result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match *op {
            Operation::Read { len } => self.apply_read(usize::from(len)),
            Operation::IoRead { len: 0 } => OperationResult::Ok(Vec::new()),
            Operation::IoRead { len } => self.apply_read(usize::from(len)),
            Operation::Close => {
                self.closed = true;
                OperationResult::Ok(Vec::new())
            },
        }
    }

    fn apply_read(&mut self, len: usize) -> OperationResult {
        if self.closed {
            return OperationResult::Error(OperationError::StreamClosed);
        }
        if len == 0 {
            return OperationResult::Error(OperationError::InvalidLength);
        }

        match self.bytes_at(self.position, len) {
            Ok(bytes) => {
                self.position += len as u64;
                OperationResult::Ok(bytes)
            },
            Err(err) => OperationResult::Error(OperationError::from(&err)),
        }
    }

    /// `len` stream bytes starting at absolute offset `start`.
    fn bytes_at(&self, start: u64, len: usize) -> Result<Vec<u8>, KdfError> {
        let hlen = self.prf.output_len() as u64;
        let mut out = Vec::with_capacity(len);
        let mut cached: Option<(u64, Vec<u8>)> = None;

        for offset in start..start + len as u64 {
            let index = offset / hlen + 1;
            let current = match cached.take() {
                Some((i, bytes)) if i == index => bytes,
                _ => block(&self.passphrase, &self.salt, self.iterations, &self.prf, index)?
                    .to_vec(),
            };
            out.push(current[(offset % hlen) as usize]);
            cached = Some((index, current));
        }

        Ok(out)
    }
}
