//! PBKDF2 block function (RFC 8018 §5.2, `F`).
//!
//! ```text
//! U1 = PRF(P, S || BE32(i))
//! Uj = PRF(P, U{j-1})            j = 2..c
//! F  = U1 ^ U2 ^ ... ^ Uc
//! ```
//!
//! # Invariants
//!
//! - Exactly `c` PRF invocations per block
//! - `c = 1` returns `U1` untouched
//! - Every intermediate buffer is zeroed on drop

use keystream_prf::{Prf, PrfError};
use zeroize::Zeroizing;

use crate::{
    encoding::uint_to_be_bytes,
    error::{KdfError, Result},
    params::Iterations,
};

/// Largest block index PBKDF2 permits.
pub const MAX_BLOCK_INDEX: u64 = u32::MAX as u64;

/// Width of the encoded block index.
const INDEX_LEN: usize = 4;

/// Compute block `index` of the key stream.
///
/// `index` is 1-based. Zero is `InvalidInput`; anything past
/// [`MAX_BLOCK_INDEX`] is `DerivedKeyTooLong`.
pub fn block(
    passphrase: &[u8],
    salt: &[u8],
    iterations: Iterations,
    prf: &dyn Prf,
    index: u64,
) -> Result<Zeroizing<Vec<u8>>> {
    if index == 0 {
        return Err(KdfError::InvalidInput { what: "block index", value: 0 });
    }
    if index > MAX_BLOCK_INDEX {
        return Err(KdfError::DerivedKeyTooLong { block_index: index });
    }

    let hlen = prf.output_len();

    let mut message = Zeroizing::new(Vec::with_capacity(salt.len() + INDEX_LEN));
    message.extend_from_slice(salt);
    message.extend_from_slice(&uint_to_be_bytes(index, INDEX_LEN));

    let mut u = checked(prf.compute(passphrase, &message)?, hlen)?;
    let mut result = u.clone();

    for _ in 1..iterations.get() {
        u = checked(prf.compute(passphrase, &u)?, hlen)?;
        xor_in_place(&mut result, &u);
    }

    tracing::trace!(index, iterations = iterations.get(), "generated block");

    Ok(result)
}

/// Wrap PRF output, rejecting lengths other than the declared `hlen`.
fn checked(output: Vec<u8>, hlen: usize) -> Result<Zeroizing<Vec<u8>>> {
    let output = Zeroizing::new(output);
    if output.len() != hlen {
        return Err(PrfError::OutputLength { expected: hlen, actual: output.len() }.into());
    }
    Ok(output)
}

fn xor_in_place(acc: &mut [u8], other: &[u8]) {
    debug_assert_eq!(acc.len(), other.len(), "length mismatch in xor");
    acc.iter_mut().zip(other).for_each(|(a, b)| *a ^= b);
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use keystream_prf::HmacAlgorithm;

    use super::*;

    fn iters(n: u64) -> Iterations {
        Iterations::new(n).unwrap()
    }

    /// PRF that returns a fixed-length slice of its message, for tracing the
    /// fold by hand.
    #[derive(Debug)]
    struct Echo;

    impl Prf for Echo {
        fn name(&self) -> &str {
            "ECHO"
        }

        fn output_len(&self) -> usize {
            4
        }

        fn compute(&self, _key: &[u8], message: &[u8]) -> std::result::Result<Vec<u8>, PrfError> {
            // Last four bytes, each incremented
            Ok(message[message.len() - 4..].iter().map(|b| b.wrapping_add(1)).collect())
        }
    }

    #[derive(Debug)]
    struct Short;

    impl Prf for Short {
        fn name(&self) -> &str {
            "SHORT"
        }

        fn output_len(&self) -> usize {
            8
        }

        fn compute(&self, _key: &[u8], _message: &[u8]) -> std::result::Result<Vec<u8>, PrfError> {
            Ok(vec![0; 3])
        }
    }

    #[test]
    fn single_iteration_is_first_prf_output() {
        let prf = HmacAlgorithm::Sha256;
        let out = block(b"password", b"salt", iters(1), &prf, 1).unwrap();
        let u1 = prf.compute(b"password", b"salt\x00\x00\x00\x01").unwrap();
        assert_eq!(out.as_slice(), u1.as_slice());
    }

    #[test]
    fn rfc6070_first_block() {
        let out = block(b"password", b"salt", iters(2), &HmacAlgorithm::Sha1, 1).unwrap();
        assert_eq!(out.as_slice(), &hex!("ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957"));
    }

    #[test]
    fn fold_xors_every_iteration() {
        // U1 = [1,1,1,2], U2 = [2,2,2,3], U3 = [3,3,3,4]
        // F  = [0,0,0,5]
        let out = block(b"", b"", iters(3), &Echo, 1).unwrap();
        assert_eq!(out.as_slice(), &[1 ^ 2 ^ 3, 1 ^ 2 ^ 3, 1 ^ 2 ^ 3, 2 ^ 3 ^ 4]);
    }

    #[test]
    fn index_is_big_endian() {
        let out = block(b"", b"", iters(1), &Echo, 0x0102_0304).unwrap();
        assert_eq!(out.as_slice(), &[2, 3, 4, 5]);
    }

    #[test]
    fn index_zero_rejected() {
        let err = block(b"p", b"s", iters(1), &Echo, 0).unwrap_err();
        assert_eq!(err, KdfError::InvalidInput { what: "block index", value: 0 });
    }

    #[test]
    fn index_past_max_rejected() {
        let err = block(b"p", b"s", iters(1), &Echo, MAX_BLOCK_INDEX + 1).unwrap_err();
        assert_eq!(err, KdfError::DerivedKeyTooLong { block_index: MAX_BLOCK_INDEX + 1 });
    }

    #[test]
    fn max_index_accepted() {
        let out = block(b"p", b"s", iters(1), &Echo, MAX_BLOCK_INDEX).unwrap();
        assert_eq!(out.as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn wrong_output_length_rejected() {
        let err = block(b"p", b"s", iters(1), &Short, 1).unwrap_err();
        assert_eq!(err, KdfError::Prf(PrfError::OutputLength { expected: 8, actual: 3 }));
    }
}
