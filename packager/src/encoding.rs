//! UTF-16 text encoding for the marker files.
//!
//! The update pipeline reads `version.txt` and `filelist.txt` as UTF-16
//! little endian with a leading byte order mark.

use thiserror::Error;

/// Byte order mark for UTF-16 little endian.
pub const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// Errors arising while decoding UTF-16 text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The input length is not a whole number of code units.
    #[error("UTF-16 text has odd byte length {0}")]
    OddLength(usize),

    /// The input contains an unpaired surrogate.
    #[error("invalid UTF-16 text: {0}")]
    InvalidUtf16(String),
}

/// Encode `text` as UTF-16 little endian, prefixed with a byte order mark.
///
/// # Examples
///
/// ```
/// use patch_packager::encoding::encode_utf16le;
///
/// assert_eq!(encode_utf16le("3"), vec![0xFF, 0xFE, b'3', 0x00]);
/// ```
#[must_use]
pub fn encode_utf16le(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(UTF16LE_BOM.len() + text.len() * 2);
    bytes.extend_from_slice(&UTF16LE_BOM);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Decode UTF-16 little endian bytes, skipping a leading byte order mark.
///
/// # Errors
///
/// Returns [`EncodingError::OddLength`] if the payload is not made of
/// 16-bit units, or [`EncodingError::InvalidUtf16`] if it does not decode.
pub fn decode_utf16le(bytes: &[u8]) -> Result<String, EncodingError> {
    let payload = bytes.strip_prefix(&UTF16LE_BOM).unwrap_or(bytes);
    if payload.len() % 2 != 0 {
        return Err(EncodingError::OddLength(payload.len()));
    }
    let units: Vec<u16> = payload
        .chunks_exact(2)
        .filter_map(|pair| <[u8; 2]>::try_from(pair).ok())
        .map(u16::from_le_bytes)
        .collect();
    String::from_utf16(&units).map_err(|err| EncodingError::InvalidUtf16(err.to_string()))
}
