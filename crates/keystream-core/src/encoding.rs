//! Byte-encoding helpers.
//!
//! Passphrases and salts arrive either as bytes or as text. Text whose
//! encoding the caller could not vouch for (raw bytes labelled as text, or an
//! `OsStr` from argv/env) is validated as UTF-8 before use.

use std::{ffi::OsStr, fmt};

use zeroize::Zeroizing;

use crate::error::{KdfError, Result};

/// Passphrase or salt input before normalization.
///
/// # Security
///
/// - **Debug Redaction**: the `Debug` impl prints only the variant and
///   length, so passphrases never reach logs.
#[derive(Clone, Copy)]
pub enum Material<'a> {
    /// Opaque bytes, passed through unchanged.
    Bytes(&'a [u8]),
    /// UTF-8 text (valid by construction).
    Text(&'a str),
    /// Bytes that claim to be UTF-8 text and must be validated.
    RawText(&'a [u8]),
    /// Platform string (argv, environment) that must be valid UTF-8.
    OsText(&'a OsStr),
}

impl Material<'_> {
    /// Length of the input in its native representation.
    pub fn len(&self) -> usize {
        match self {
            Self::Bytes(b) | Self::RawText(b) => b.len(),
            Self::Text(s) => s.len(),
            Self::OsText(s) => s.len(),
        }
    }

    /// Returns true if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Material<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Bytes(_) => "Bytes",
            Self::Text(_) => "Text",
            Self::RawText(_) => "RawText",
            Self::OsText(_) => "OsText",
        };
        write!(f, "{kind}(<redacted {} bytes>)", self.len())
    }
}

impl<'a> From<&'a [u8]> for Material<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Material<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Material<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for Material<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Material<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a OsStr> for Material<'a> {
    fn from(text: &'a OsStr) -> Self {
        Self::OsText(text)
    }
}

/// Normalize a passphrase or salt to bytes.
///
/// Bytes pass through unchanged; text is encoded as UTF-8. The result is
/// zeroed on drop.
pub fn text_to_bytes(material: Material<'_>) -> Result<Zeroizing<Vec<u8>>> {
    let bytes = match material {
        Material::Bytes(bytes) => bytes,
        Material::Text(text) => text.as_bytes(),
        Material::RawText(raw) => std::str::from_utf8(raw)
            .map_err(|e| KdfError::InvalidEncoding {
                reason: format!("invalid UTF-8 at byte {}", e.valid_up_to()),
            })?
            .as_bytes(),
        Material::OsText(os) => os
            .to_str()
            .ok_or_else(|| KdfError::InvalidEncoding {
                reason: "platform string is not valid UTF-8".to_string(),
            })?
            .as_bytes(),
    };

    Ok(Zeroizing::new(bytes.to_vec()))
}

/// Minimal big-endian encoding of `n`, left-padded with zeros to at least
/// `min_len` bytes.
///
/// Zero encodes as a single `0x00` before padding.
pub fn uint_to_be_bytes(n: u64, min_len: usize) -> Vec<u8> {
    let full = n.to_be_bytes();
    let significant = (n.leading_zeros() / 8) as usize;
    let minimal = if n == 0 { &full[full.len() - 1..] } else { &full[significant..] };

    let pad = min_len.saturating_sub(minimal.len());
    let mut out = Vec::with_capacity(pad + minimal.len());
    out.resize(pad, 0);
    out.extend_from_slice(minimal);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_pass_through() {
        let raw = [0xff, 0x00, 0xfe];
        let out = text_to_bytes(Material::from(&raw)).unwrap();
        assert_eq!(out.as_slice(), &raw);
    }

    #[test]
    fn text_converts_to_utf8() {
        let out = text_to_bytes(Material::from("pässword")).unwrap();
        assert_eq!(out.as_slice(), "pässword".as_bytes());
    }

    #[test]
    fn raw_text_valid_utf8_accepted() {
        let out = text_to_bytes(Material::RawText(b"salt")).unwrap();
        assert_eq!(out.as_slice(), b"salt");
    }

    #[test]
    fn raw_text_invalid_utf8_rejected() {
        let err = text_to_bytes(Material::RawText(&[b'o', b'k', 0xc3, 0x28])).unwrap_err();
        assert_eq!(
            err,
            KdfError::InvalidEncoding { reason: "invalid UTF-8 at byte 2".to_string() }
        );
    }

    #[test]
    fn bytes_never_rejected_for_encoding() {
        let out = text_to_bytes(Material::Bytes(&[0xc3, 0x28])).unwrap();
        assert_eq!(out.as_slice(), &[0xc3, 0x28]);
    }

    #[cfg(unix)]
    #[test]
    fn os_text_invalid_utf8_rejected() {
        use std::os::unix::ffi::OsStrExt;

        let os = OsStr::from_bytes(&[0x66, 0x6f, 0x80]);
        let err = text_to_bytes(Material::from(os)).unwrap_err();
        assert!(matches!(err, KdfError::InvalidEncoding { .. }));
    }

    #[test]
    fn os_text_valid_utf8_accepted() {
        let out = text_to_bytes(Material::from(OsStr::new("salt"))).unwrap();
        assert_eq!(out.as_slice(), b"salt");
    }

    #[test]
    fn debug_redacts_content() {
        let debug = format!("{:?}", Material::from("hunter2"));
        assert_eq!(debug, "Text(<redacted 7 bytes>)");
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn uint_pads_to_min_len() {
        assert_eq!(uint_to_be_bytes(1, 4), vec![0, 0, 0, 1]);
        assert_eq!(uint_to_be_bytes(0x0102, 4), vec![0, 0, 1, 2]);
    }

    #[test]
    fn uint_exceeding_min_len_is_not_truncated() {
        assert_eq!(uint_to_be_bytes(0x0102_0304_05, 4), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn uint_zero() {
        assert_eq!(uint_to_be_bytes(0, 0), vec![0]);
        assert_eq!(uint_to_be_bytes(0, 4), vec![0, 0, 0, 0]);
    }

    #[test]
    fn uint_max_block_index() {
        assert_eq!(uint_to_be_bytes(u64::from(u32::MAX), 4), vec![0xff; 4]);
    }

    #[test]
    fn uint_minimal_without_padding() {
        assert_eq!(uint_to_be_bytes(0x80, 0), vec![0x80]);
        assert_eq!(uint_to_be_bytes(u64::MAX, 0), vec![0xff; 8]);
    }
}
