//! Length-field codec (X.690 §8.1.3).

use crate::error::{Error, ErrorKind, Result};
use crate::reader::Reader;
use crate::writer::Writer;
use core::fmt;

/// The largest length value representable in this crate: `2^63 - 1`,
/// matching the spec's bound on both the definite length and the tag
/// number range.
pub const MAX_LENGTH: u64 = (1u64 << 63) - 1;

/// A BER length field: either a definite byte count or the indefinite-form
/// sentinel (valid only on constructed encodings, terminated by an
/// End-of-Content marker).
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Length {
    /// A definite number of value octets, `0..=2^63-1`.
    Definite(u64),
    /// The indefinite-length sentinel (encoded as the single byte `0x80`).
    Indefinite,
}

impl Length {
    /// The zero-length definite value.
    pub const ZERO: Length = Length::Definite(0);

    /// Build a definite length, rejecting values above [`MAX_LENGTH`].
    pub fn new(value: u64) -> Result<Self> {
        if value > MAX_LENGTH {
            Err(Error::new(ErrorKind::LengthOverflow))
        } else {
            Ok(Length::Definite(value))
        }
    }

    /// `true` if this is [`Length::Indefinite`].
    pub fn is_indefinite(self) -> bool {
        matches!(self, Length::Indefinite)
    }

    /// `true` if this is a definite length.
    pub fn is_definite(self) -> bool {
        !self.is_indefinite()
    }

    /// The definite value, or `None` for the indefinite sentinel.
    pub fn value(self) -> Option<u64> {
        match self {
            Length::Definite(v) => Some(v),
            Length::Indefinite => None,
        }
    }

    /// Number of octets this length value would occupy when encoded in
    /// shortest form (used as a size predictor when building nodes from
    /// already-known value byte counts).
    pub fn field_size(self) -> usize {
        match self {
            Length::Indefinite => 1,
            Length::Definite(v) if v <= 0x7f => 1,
            Length::Definite(v) => 1 + long_form_octets(v),
        }
    }

    /// Add a definite length to a byte count, failing on overflow past
    /// [`MAX_LENGTH`]. Used to accumulate constructed-node value-field sizes.
    pub fn checked_add(self, other: u64) -> Result<Self> {
        match self {
            Length::Definite(v) => v
                .checked_add(other)
                .filter(|&sum| sum <= MAX_LENGTH)
                .map(Length::Definite)
                .ok_or_else(|| Error::new(ErrorKind::LengthOverflow)),
            Length::Indefinite => Err(Error::new(ErrorKind::LengthOverflow)),
        }
    }
}

impl TryFrom<usize> for Length {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Length::new(value as u64)
    }
}

impl TryFrom<Length> for u64 {
    type Error = Error;

    fn try_from(length: Length) -> Result<Self> {
        length.value().ok_or_else(|| Error::new(ErrorKind::LengthOverflow))
    }
}

impl TryFrom<Length> for usize {
    type Error = Error;

    fn try_from(length: Length) -> Result<Self> {
        let v = u64::try_from(length)?;
        usize::try_from(v).map_err(|_| Error::new(ErrorKind::LengthOverflow))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Definite(v) => write!(f, "{v}"),
            Length::Indefinite => f.write_str("indefinite"),
        }
    }
}

fn long_form_octets(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    core::cmp::max(1, (bits + 7) / 8)
}

/// Read the value-field length, per X.690 §8.1.3. Returns the parsed
/// length and the number of octets consumed from `reader`.
///
/// Non-minimal long-form encodings are accepted (BER, not just DER); the
/// caller (specific-type constructor) is responsible for recording a
/// finding when that matters.
pub fn read_length<'r, R: Reader<'r>>(reader: &mut R) -> Result<(Length, usize)> {
    let first = reader.read_byte()?;

    if first == 0x80 {
        return Ok((Length::Indefinite, 1));
    }

    if first & 0x80 == 0 {
        return Ok((Length::Definite(first as u64), 1));
    }

    let n = (first & 0x7f) as usize;
    if n == 127 {
        return Err(reader.error(ErrorKind::ReservedLengthForm));
    }

    let mut value: u128 = 0;
    for _ in 0..n {
        let byte = reader.read_byte()?;
        value = (value << 8) | byte as u128;
    }

    if value > MAX_LENGTH as u128 {
        return Err(reader.error(ErrorKind::LengthOverflow));
    }

    Ok((Length::Definite(value as u64), 1 + n))
}

/// Emit `length` in shortest form. Indefinite emits the single byte `0x80`.
pub fn write_length(length: Length, writer: &mut impl Writer) -> Result<()> {
    match length {
        Length::Indefinite => writer.write_bytes(&[0x80]),
        Length::Definite(v) if v <= 0x7f => writer.write_bytes(&[v as u8]),
        Length::Definite(v) => {
            let n = long_form_octets(v);
            let bytes = v.to_be_bytes();
            writer.write_bytes(&[0x80 | n as u8])?;
            writer.write_bytes(&bytes[bytes.len() - n..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::SliceReader;
    use crate::writer::VecWriter;

    fn roundtrip(length: Length) -> Vec<u8> {
        let mut w = VecWriter::new();
        write_length(length, &mut w).unwrap();
        let bytes = w.into_vec();
        let mut r = SliceReader::new(&bytes);
        let (decoded, consumed) = read_length(&mut r).unwrap();
        assert_eq!(decoded, length);
        assert_eq!(consumed, bytes.len());
        bytes
    }

    #[test]
    fn short_form_boundaries() {
        assert_eq!(roundtrip(Length::Definite(0)), vec![0x00]);
        assert_eq!(roundtrip(Length::Definite(0x7f)), vec![0x7f]);
    }

    #[test]
    fn long_form_boundary() {
        assert_eq!(roundtrip(Length::Definite(0x80)), vec![0x81, 0x80]);
    }

    #[test]
    fn max_length() {
        assert_eq!(
            roundtrip(Length::Definite(MAX_LENGTH)),
            vec![0x88, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn indefinite() {
        assert_eq!(roundtrip(Length::Indefinite), vec![0x80]);
    }

    #[test]
    fn overflow_rejected() {
        let bytes = [0x88, 0x80, 0, 0, 0, 0, 0, 0, 0];
        let mut r = SliceReader::new(&bytes);
        assert_eq!(read_length(&mut r).unwrap_err().kind(), ErrorKind::LengthOverflow);
    }

    #[test]
    fn reserved_form_rejected() {
        let bytes = [0xff];
        let mut r = SliceReader::new(&bytes);
        assert_eq!(
            read_length(&mut r).unwrap_err().kind(),
            ErrorKind::ReservedLengthForm
        );
    }

    proptest::proptest! {
        #[test]
        fn prop_length_roundtrip(v in 0u64..=MAX_LENGTH) {
            let length = Length::Definite(v);
            let mut w = VecWriter::new();
            write_length(length, &mut w).unwrap();
            let bytes = w.into_vec();
            let mut r = SliceReader::new(&bytes);
            let (decoded, consumed) = read_length(&mut r).unwrap();
            prop_assert_eq!(decoded, length);
            prop_assert_eq!(consumed, length.field_size());
        }
    }
}
