//! Tag-field codec (X.690 §8.1.2).

use crate::error::{Error, ErrorKind, Result, TagReason};
use crate::length::Length;
use crate::reader::Reader;
use crate::writer::Writer;
use core::fmt;

/// Maximum number of octets a tag field may occupy in this implementation.
/// One leading octet plus 9 base-128 continuation octets carries a full
/// 63-bit tag number (63 = 9*7), matching the `[0, 2^63-1]` range declared
/// by §3.1 and the boundary values worked through by §8.
pub const MAX_TAG_LEN: usize = 10;

/// The two-bit class field of a tag (X.690 §8.1.2.2).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Class {
    /// `00`
    Universal,
    /// `01`
    Application,
    /// `10`
    ContextSpecific,
    /// `11`
    Private,
}

impl Class {
    fn from_bits(byte: u8) -> Self {
        match byte & 0b1100_0000 {
            0b0000_0000 => Class::Universal,
            0b0100_0000 => Class::Application,
            0b1000_0000 => Class::ContextSpecific,
            _ => Class::Private,
        }
    }

    fn bits(self) -> u8 {
        match self {
            Class::Universal => 0b0000_0000,
            Class::Application => 0b0100_0000,
            Class::ContextSpecific => 0b1000_0000,
            Class::Private => 0b1100_0000,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Class::Universal => "UNIVERSAL",
            Class::Application => "APPLICATION",
            Class::ContextSpecific => "CONTEXT-SPECIFIC",
            Class::Private => "PRIVATE",
        };
        f.write_str(s)
    }
}

/// Primitive or constructed form (bit 6 of the first tag octet).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Form {
    /// Bit 6 = 0: the value field is not itself BER-TLV encoded.
    Primitive,
    /// Bit 6 = 1: the value field is a concatenation of BER-TLV encodings.
    Constructed,
}

impl Form {
    fn from_bits(byte: u8) -> Self {
        if byte & 0b0010_0000 == 0 {
            Form::Primitive
        } else {
            Form::Constructed
        }
    }

    fn bit(self) -> u8 {
        match self {
            Form::Primitive => 0,
            Form::Constructed => 0b0010_0000,
        }
    }
}

/// A BER tag: class, form, and a non-negative tag number.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Tag {
    class: Class,
    form: Form,
    number: u64,
}

impl Tag {
    /// `UNIVERSAL 0, primitive` — End-of-Content.
    pub const END_OF_CONTENT: Tag = Tag::universal(0, Form::Primitive);
    /// `UNIVERSAL 1, primitive` — BOOLEAN.
    pub const BOOLEAN: Tag = Tag::universal(1, Form::Primitive);
    /// `UNIVERSAL 2, primitive` — INTEGER.
    pub const INTEGER: Tag = Tag::universal(2, Form::Primitive);
    /// `UNIVERSAL 3, primitive` — BIT STRING.
    pub const BIT_STRING: Tag = Tag::universal(3, Form::Primitive);
    /// `UNIVERSAL 4, primitive` — OCTET STRING.
    pub const OCTET_STRING: Tag = Tag::universal(4, Form::Primitive);
    /// `UNIVERSAL 5, primitive` — NULL.
    pub const NULL: Tag = Tag::universal(5, Form::Primitive);
    /// `UNIVERSAL 6, primitive` — OBJECT IDENTIFIER.
    pub const OID: Tag = Tag::universal(6, Form::Primitive);
    /// `UNIVERSAL 12, primitive` — UTF8String.
    pub const UTF8_STRING: Tag = Tag::universal(12, Form::Primitive);
    /// `UNIVERSAL 16, constructed` — SEQUENCE (OF).
    pub const SEQUENCE: Tag = Tag::universal(16, Form::Constructed);
    /// `UNIVERSAL 17, constructed` — SET (OF).
    pub const SET: Tag = Tag::universal(17, Form::Constructed);
    /// `UNIVERSAL 19, primitive` — PrintableString.
    pub const PRINTABLE_STRING: Tag = Tag::universal(19, Form::Primitive);
    /// `UNIVERSAL 20, primitive` — TeletexString.
    pub const TELETEX_STRING: Tag = Tag::universal(20, Form::Primitive);
    /// `UNIVERSAL 22, primitive` — IA5String.
    pub const IA5_STRING: Tag = Tag::universal(22, Form::Primitive);
    /// `UNIVERSAL 23, primitive` — UTCTime.
    pub const UTC_TIME: Tag = Tag::universal(23, Form::Primitive);
    /// `UNIVERSAL 31, primitive` — DATE.
    pub const DATE: Tag = Tag::universal(31, Form::Primitive);

    const fn universal(number: u64, form: Form) -> Tag {
        Tag {
            class: Class::Universal,
            form,
            number,
        }
    }

    /// Build a tag from its class, form and number.
    ///
    /// Fails with [`ErrorKind::InvalidTagNumber`] if `number` exceeds the
    /// range representable within [`MAX_TAG_LEN`] octets.
    pub fn new(class: Class, form: Form, number: u64) -> Result<Self> {
        let tag = Tag { class, form, number };
        // Validate by round-tripping through the encoder, which enforces
        // MAX_TAG_LEN and rejects numbers that don't fit.
        let mut probe = Vec::new();
        tag.encode(&mut probe)
            .map_err(|_| Error::new(ErrorKind::InvalidTagNumber))?;
        Ok(tag)
    }

    /// The tag's class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// The tag's form.
    pub fn form(&self) -> Form {
        self.form
    }

    /// `true` if this tag has constructed form.
    pub fn is_constructed(&self) -> bool {
        matches!(self.form, Form::Constructed)
    }

    /// `true` if this tag has primitive form.
    pub fn is_primitive(&self) -> bool {
        matches!(self.form, Form::Primitive)
    }

    /// The tag number.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// `(class, form, number)` — mirrors spec's `classify` operation.
    pub fn classify(&self) -> (Class, Form, u64) {
        (self.class, self.form, self.number)
    }

    /// Re-express this tag with a different form (class and number unchanged).
    pub fn with_form(self, form: Form) -> Tag {
        Tag { form, ..self }
    }

    /// Number of octets this tag occupies when encoded.
    pub fn encoded_len(&self) -> Result<Length> {
        Length::new(tag_octet_len(self.number) as u64)
    }

    /// Encode this tag's canonical octets into `writer`.
    pub fn encode(&self, writer: &mut impl Writer) -> Result<()> {
        let first_byte_base = self.class.bits() | self.form.bit();

        if self.number <= 30 {
            return writer.write_bytes(&[first_byte_base | self.number as u8]);
        }

        let groups = base128_groups(self.number);
        if 1 + groups.len() > MAX_TAG_LEN {
            return Err(Error::new(ErrorKind::TagTooLong { len: 1 + groups.len() }));
        }

        writer.write_bytes(&[first_byte_base | 0b0001_1111])?;
        for (i, group) in groups.iter().enumerate() {
            let continuation = if i + 1 == groups.len() { 0 } else { 0x80 };
            writer.write_bytes(&[group | continuation])?;
        }
        Ok(())
    }

    /// Decode a tag from `reader`, positioned at its first octet.
    pub fn decode<'r, R: Reader<'r>>(reader: &mut R) -> Result<Self> {
        let start = reader.position();
        let first = reader.read_byte()?;
        let class = Class::from_bits(first);
        let form = Form::from_bits(first);

        if first & 0b0001_1111 != 0b0001_1111 {
            return Ok(Tag {
                class,
                form,
                number: (first & 0b0001_1111) as u64,
            });
        }

        let mut number: u64 = 0;
        let mut consumed = 1usize;
        let mut first_subsequent = true;

        loop {
            if consumed >= MAX_TAG_LEN {
                return Err(Error::at(ErrorKind::TagTooLong { len: consumed + 1 }, start));
            }
            let byte = reader.read_byte()?;
            consumed += 1;

            if first_subsequent {
                if byte & 0x7f == 0 {
                    return Err(Error::at(
                        ErrorKind::MalformedTag(TagReason::LeadingZeroSubsequentByte),
                        start,
                    ));
                }
                first_subsequent = false;
            }

            number = number
                .checked_shl(7)
                .ok_or_else(|| Error::at(ErrorKind::TagTooLong { len: consumed }, start))?
                | (byte & 0x7f) as u64;

            if byte & 0x80 == 0 {
                break;
            }
        }

        if number <= 30 {
            return Err(Error::at(
                ErrorKind::MalformedTag(TagReason::RedundantMultiByteEncoding),
                start,
            ));
        }

        Ok(Tag { class, form, number })
    }
}

fn tag_octet_len(number: u64) -> usize {
    if number <= 30 {
        1
    } else {
        1 + base128_groups(number).len()
    }
}

fn base128_groups(mut number: u64) -> Vec<u8> {
    let mut groups = Vec::new();
    loop {
        groups.push((number & 0x7f) as u8);
        number >>= 7;
        if number == 0 {
            break;
        }
    }
    groups.reverse();
    groups
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tag {{ class: {:?}, form: {:?}, number: {} }}",
            self.class, self.form, self.number
        )
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = match self.form {
            Form::Primitive => "primitive",
            Form::Constructed => "constructed",
        };
        write!(f, "{} {} #{} ({})", self.class, form, self.number, form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::SliceReader;
    use crate::writer::VecWriter;

    fn encode(tag: Tag) -> Vec<u8> {
        let mut w = VecWriter::new();
        tag.encode(&mut w).unwrap();
        w.into_vec()
    }

    fn decode(bytes: &[u8]) -> Result<Tag> {
        let mut r = SliceReader::new(bytes);
        Tag::decode(&mut r)
    }

    #[test]
    fn one_byte_boundary() {
        let tag = Tag::new(Class::Universal, Form::Primitive, 30).unwrap();
        assert_eq!(encode(tag), vec![0x1e]);
    }

    #[test]
    fn two_byte_boundary() {
        let tag = Tag::new(Class::Universal, Form::Primitive, 31).unwrap();
        assert_eq!(encode(tag), vec![0x1f, 0x1f]);
    }

    #[test]
    fn redundant_two_byte_tag_rejected() {
        assert_eq!(
            decode(&[0x1f, 0x1e]).unwrap_err().kind(),
            ErrorKind::MalformedTag(TagReason::RedundantMultiByteEncoding)
        );
    }

    #[test]
    fn leading_zero_padding_rejected() {
        assert_eq!(
            decode(&[0x1f, 0x80, 0x1f]).unwrap_err().kind(),
            ErrorKind::MalformedTag(TagReason::LeadingZeroSubsequentByte)
        );
    }

    #[test]
    fn context_specific_constructed_roundtrip() {
        let tag = Tag::new(Class::ContextSpecific, Form::Constructed, 1).unwrap();
        let bytes = encode(tag);
        assert_eq!(bytes, vec![0xa1]);
        assert_eq!(decode(&bytes).unwrap(), tag);
    }

    #[test]
    fn tag_too_long_rejected() {
        // 11-byte tag: leading + 10 continuation bytes, one past the limit.
        let bytes = [
            0x1f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f,
        ];
        assert!(matches!(
            decode(&bytes).unwrap_err().kind(),
            ErrorKind::TagTooLong { .. }
        ));
    }

    #[test]
    fn boundary_number_just_below_two_pow_49_roundtrips() {
        // Largest number that fit under the old (incorrect) 8-byte cap.
        let tag = Tag::new(Class::Universal, Form::Primitive, (1u64 << 49) - 1).unwrap();
        let bytes = encode(tag);
        assert_eq!(decode(&bytes).unwrap(), tag);
    }

    #[test]
    fn boundary_number_two_pow_49_roundtrips() {
        let tag = Tag::new(Class::ContextSpecific, Form::Constructed, 1u64 << 49).unwrap();
        let bytes = encode(tag);
        assert_eq!(decode(&bytes).unwrap(), tag);
    }

    #[test]
    fn boundary_number_two_pow_56_roundtrips() {
        let tag = Tag::new(Class::Application, Form::Primitive, 1u64 << 56).unwrap();
        let bytes = encode(tag);
        assert_eq!(decode(&bytes).unwrap(), tag);
    }

    #[test]
    fn boundary_number_two_pow_63_minus_one_roundtrips() {
        // 63 = 9*7: the largest number this implementation's tag-number
        // range (spec §3.1) admits, needing exactly 9 continuation bytes.
        let tag = Tag::new(Class::Private, Form::Constructed, (1u64 << 63) - 1).unwrap();
        let bytes = encode(tag);
        assert_eq!(bytes.len(), 10);
        assert_eq!(decode(&bytes).unwrap(), tag);
    }

    proptest::proptest! {
        #[test]
        fn prop_tag_roundtrip(number in 0u64..=(1u64 << 63) - 1, class_idx in 0u8..4, constructed in proptest::bool::ANY) {
            let class = match class_idx {
                0 => Class::Universal,
                1 => Class::Application,
                2 => Class::ContextSpecific,
                _ => Class::Private,
            };
            let form = if constructed { Form::Constructed } else { Form::Primitive };
            if let Ok(tag) = Tag::new(class, form, number) {
                let bytes = encode(tag);
                let decoded = decode(&bytes).unwrap();
                prop_assert_eq!(decoded, tag);
                prop_assert_eq!(decoded.classify(), (class, form, number));
            }
        }
    }
}
