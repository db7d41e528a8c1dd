//! One-shot derivation.
//!
//! Assembles `dk_len` bytes from consecutive blocks starting at index 1 and
//! discards the unused tail of the final block.

use zeroize::Zeroizing;

use crate::{
    block::{MAX_BLOCK_INDEX, block},
    encoding::{Material, text_to_bytes},
    error::{KdfError, Result},
    params::{DeriveParams, Resolved},
    record::DerivedKeyRecord,
};

/// Derive exactly `dk_len` bytes.
///
/// # Errors
///
/// - `InvalidEncoding` if passphrase or salt text is not UTF-8
/// - `InvalidInput` if `dk_len` is zero
/// - `InvalidInput`/`OutOfRange` for a bad iteration count
/// - `UnknownPrf` if the PRF identifier does not resolve
/// - `DerivedKeyTooLong` if `dk_len` needs more than `2^32 - 1` blocks
pub fn derive<'p, 's>(
    passphrase: impl Into<Material<'p>>,
    salt: impl Into<Material<'s>>,
    dk_len: usize,
    params: &DeriveParams,
) -> Result<Zeroizing<Vec<u8>>> {
    let passphrase = text_to_bytes(passphrase.into())?;
    let salt = text_to_bytes(salt.into())?;
    let resolved = params.resolve()?;

    derive_bytes(&passphrase, &salt, dk_len, &resolved)
}

/// Derive `dk_len` bytes and describe how they were produced.
pub fn derive_record<'p, 's>(
    passphrase: impl Into<Material<'p>>,
    salt: impl Into<Material<'s>>,
    dk_len: usize,
    params: &DeriveParams,
) -> Result<DerivedKeyRecord> {
    let passphrase = text_to_bytes(passphrase.into())?;
    let salt = text_to_bytes(salt.into())?;
    let resolved = params.resolve()?;

    let key = derive_bytes(&passphrase, &salt, dk_len, &resolved)?;

    Ok(DerivedKeyRecord {
        key: key.to_vec(),
        salt: salt.to_vec(),
        length: dk_len,
        iterations: resolved.iterations.get(),
        prf: resolved.prf.identifier().to_string(),
    })
}

/// Derivation over already-normalized inputs.
pub(crate) fn derive_bytes(
    passphrase: &[u8],
    salt: &[u8],
    dk_len: usize,
    params: &Resolved,
) -> Result<Zeroizing<Vec<u8>>> {
    if dk_len == 0 {
        return Err(KdfError::InvalidInput { what: "dk_len", value: 0 });
    }

    let hlen = params.prf.output_len();
    let blocks = blocks_needed(dk_len, hlen)?;

    tracing::debug!(
        dk_len,
        iterations = params.iterations.get(),
        prf = params.prf.identifier(),
        blocks,
        "deriving key"
    );

    let mut out = Zeroizing::new(vec![0u8; dk_len]);
    for (index, chunk) in (1..=blocks).zip(out.chunks_mut(hlen)) {
        let t = block(passphrase, salt, params.iterations, &*params.prf, index)?;
        chunk.copy_from_slice(&t[..chunk.len()]);
    }

    Ok(out)
}

/// Number of `hlen`-byte blocks covering `len` bytes.
///
/// Fails with `DerivedKeyTooLong` before any work is done if the count
/// exceeds [`MAX_BLOCK_INDEX`].
pub(crate) fn blocks_needed(len: usize, hlen: usize) -> Result<u64> {
    let blocks = u64::try_from(len.div_ceil(hlen)).unwrap_or(u64::MAX);
    if blocks > MAX_BLOCK_INDEX {
        return Err(KdfError::DerivedKeyTooLong { block_index: MAX_BLOCK_INDEX + 1 });
    }
    Ok(blocks)
}
