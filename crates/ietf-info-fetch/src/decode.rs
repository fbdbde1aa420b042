//! Response body decoding: UTF-8, then ISO-8859-1.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("body is neither UTF-8 nor Latin-1 text (byte {byte:#04x} at offset {offset})")]
pub struct DecodeError {
    pub offset: usize,
    pub byte: u8,
}

/// Decode a response body as text.
///
/// Latin-1 is the fallback. Stray Windows-1252 bytes in `0x80..=0x9F` are
/// accepted; NUL and the C0 controls that never appear in text (everything
/// below `0x20` except tab, line feed, form feed and carriage return) mark
/// the body as binary and make the fallback fail.
pub fn decode_text(bytes: &[u8]) -> Result<String, DecodeError> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_owned()),
        Err(_) => decode_latin1(bytes),
    }
}

fn decode_latin1(bytes: &[u8]) -> Result<String, DecodeError> {
    if let Some((offset, &byte)) = bytes
        .iter()
        .enumerate()
        .find(|(_, b)| is_binary(**b))
    {
        return Err(DecodeError { offset, byte });
    }
    Ok(bytes.iter().map(|&b| char::from(b)).collect())
}

fn is_binary(byte: u8) -> bool {
    byte < 0x20 && !matches!(byte, b'\t' | b'\n' | 0x0C | b'\r')
}
