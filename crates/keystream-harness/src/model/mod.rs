//! Reference model for model-based testing.
//!
//! The model trades speed for obviousness: byte `p` of the stream is byte
//! `p mod hLen` of block `p / hLen + 1`, computed on demand.

pub mod operation;
mod stream;

pub use operation::{Operation, OperationError, OperationResult, StreamSetup};
pub use stream::ModelStream;
