//! Hexadecimal and Base64 text codecs for the `value()`/string-constructor
//! helpers described in spec §6. These sit outside the TLV model itself;
//! specific types call them when converting between their decoded value and
//! text, and `BerTlv`'s compact formatter builds its own hex separately.

use crate::error::{Error, ErrorKind, Result};
use base64ct::{Base64, Encoding as _};

/// Encode `bytes` as lowercase hexadecimal, with no separators.
pub fn hex_encode(bytes: &[u8]) -> String {
    base16ct::lower::encode_string(bytes)
}

/// Decode a hexadecimal string, ignoring ASCII whitespace and `:`/`-`
/// punctuation between byte pairs.
///
/// Fails with [`ErrorKind::TextCodec`] on any other non-hex-digit
/// character, or an odd number of hex digits.
pub fn hex_decode(s: &str) -> Result<Vec<u8>> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();
    base16ct::mixed::decode_vec(&cleaned).map_err(|_| Error::new(ErrorKind::TextCodec("invalid hexadecimal input")))
}

/// Encode `bytes` as standard (`+`/`/`, padded) Base64.
pub fn base64_encode(bytes: &[u8]) -> String {
    Base64::encode_string(bytes)
}

/// Decode a standard Base64 string.
///
/// Fails with [`ErrorKind::EmptyInput`] on an empty `s` (the source's
/// Base64 decoder treats empty input as an exceptional case; we keep that
/// behavior but report a descriptive reason), or [`ErrorKind::TextCodec`]
/// on malformed Base64.
pub fn base64_decode(s: &str) -> Result<Vec<u8>> {
    if s.is_empty() {
        return Err(Error::new(ErrorKind::EmptyInput));
    }
    Base64::decode_vec(s.trim()).map_err(|_| Error::new(ErrorKind::TextCodec("invalid base64 input")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let bytes = [0xde, 0xad, 0xbe, 0xef];
        let s = hex_encode(&bytes);
        assert_eq!(s, "deadbeef");
        assert_eq!(hex_decode(&s).unwrap(), bytes);
    }

    #[test]
    fn hex_decode_ignores_separators() {
        assert_eq!(hex_decode("DE:AD BE-EF").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn base64_roundtrip() {
        let bytes = b"hello, world";
        let s = base64_encode(bytes);
        assert_eq!(base64_decode(&s).unwrap(), bytes.to_vec());
    }

    #[test]
    fn base64_empty_input_is_empty_input_error() {
        assert_eq!(base64_decode("").unwrap_err().kind(), ErrorKind::EmptyInput);
    }
}
