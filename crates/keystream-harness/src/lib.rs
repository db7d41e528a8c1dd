//! Differential harness for the keystream reader.
//!
//! A [`ModelStream`] computes every byte of the key stream directly from its
//! position, one block per byte, with no buffering. A [`RealStream`] drives
//! the production [`Reader`](keystream_core::Reader). Both accept the same
//! [`Operation`]s so tests and fuzzers can compare them step by step.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod real;

pub use model::{ModelStream, Operation, OperationError, OperationResult, StreamSetup};
pub use real::RealStream;
