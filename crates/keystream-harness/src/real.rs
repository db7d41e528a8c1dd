//! Real system wrapper that mirrors [`ModelStream`](crate::ModelStream)'s
//! interface.

use std::io;

use keystream_core::{KdfError, Reader};

use crate::model::{Operation, OperationError, OperationResult, StreamSetup};

/// Production [`Reader`] driven by [`Operation`]s.
#[derive(Debug)]
pub struct RealStream {
    reader: Reader,
}

impl RealStream {
    /// Open a reader for `setup`.
    pub fn new(setup: &StreamSetup) -> Result<Self, KdfError> {
        let reader = Reader::new(&setup.passphrase, &setup.salt, &setup.params())?;
        Ok(Self { reader })
    }

    /// The wrapped reader.
    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    /// Apply an operation and return the result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match *op {
            Operation::Read { len } => match self.reader.read(usize::from(len)) {
                Ok(bytes) => OperationResult::Ok(bytes.to_vec()),
                Err(err) => OperationResult::Error(OperationError::from(&err)),
            },
            Operation::IoRead { len } => {
                let mut buf = vec![0u8; usize::from(len)];
                match io::Read::read(&mut self.reader, &mut buf) {
                    Ok(n) => {
                        buf.truncate(n);
                        OperationResult::Ok(buf)
                    },
                    Err(err) => OperationResult::Error(classify_io(&err)),
                }
            },
            Operation::Close => {
                self.reader.close();
                OperationResult::Ok(Vec::new())
            },
        }
    }
}

fn classify_io(err: &io::Error) -> OperationError {
    match err.get_ref().and_then(|inner| inner.downcast_ref::<KdfError>()) {
        Some(kdf) => OperationError::from(kdf),
        None => OperationError::Unexpected,
    }
}
