//! Fuzz target for [`Reader`] against the positional model
//!
//! Buffered reads must never drift from the stream definition
//!
//! # Strategy
//!
//! - Operation sequences: Arbitrary mixes of `read`, `io::Read` and `close`
//! - Read sizes: Zero, sub-block, block-straddling and multi-block lengths
//! - Parameters: Every registered PRF, small iteration counts, arbitrary
//!   passphrase and salt bytes
//!
//! # Invariants
//!
//! - Every operation result equals the model's
//! - A failed read leaves the position unchanged
//! - No transition FROM closed (terminal invariant)
//! - Concatenated successful reads equal one-shot derivation
//! - NEVER panic on any operation sequence
//!
//! [`Reader`]: keystream_core::Reader

#![no_main]

use arbitrary::Arbitrary;
use keystream_core::derive;
use keystream_harness::{ModelStream, Operation, OperationResult, RealStream, StreamSetup};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    setup: StreamSetup,
    operations: Vec<Operation>,
}

fuzz_target!(|input: FuzzInput| {
    let Ok(mut model) = ModelStream::new(&input.setup) else { return };
    let Ok(mut real) = RealStream::new(&input.setup) else { return };

    let mut streamed = Vec::new();

    for op in input.operations.iter().take(64) {
        let was_closed = real.reader().is_closed();
        let before = real.reader().position();

        let model_result = model.apply(op);
        let real_result = real.apply(op);

        assert_eq!(model_result, real_result, "divergence on {op:?}");

        match real_result {
            OperationResult::Ok(bytes) => streamed.extend(bytes),
            OperationResult::Error(_) => {
                assert_eq!(real.reader().position(), before, "failed {op:?} moved the stream");
            },
        }

        if was_closed {
            assert!(real.reader().is_closed(), "reader reopened by {op:?}");
        }
    }

    if !streamed.is_empty() {
        let expected =
            derive(&input.setup.passphrase, &input.setup.salt, streamed.len(), &input.setup.params())
                .expect("parameters already accepted by the reader");
        assert_eq!(&streamed[..], &expected[..]);
    }
});
