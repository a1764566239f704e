//! Tree search and typed accessors over [`Constructed`] nodes (spec §4.5).

use crate::error::{Error, ErrorKind, Result};
use crate::node::{BerTlv, Constructed, Primitive};
use crate::specific::*;
use crate::tag::Tag;

impl Constructed {
    /// The first child (in insertion order) whose tag equals `tag`.
    pub fn get(&self, tag: Tag) -> Option<&BerTlv> {
        self.get_nth(tag, 0)
    }

    /// The `(n+1)`-th child (in insertion order) whose tag equals `tag`.
    pub fn get_nth(&self, tag: Tag, n: usize) -> Option<&BerTlv> {
        self.children().iter().filter(|c| c.tag() == tag).nth(n)
    }

    /// As [`Self::get`], but requires the matching child be primitive.
    pub fn get_primitive(&self, tag: Tag) -> Result<Option<&Primitive>> {
        self.get_primitive_nth(tag, 0)
    }

    /// As [`Self::get_nth`], but requires the matching child be primitive.
    pub fn get_primitive_nth(&self, tag: Tag, n: usize) -> Result<Option<&Primitive>> {
        match self.get_nth(tag, n) {
            None => Ok(None),
            Some(BerTlv::Primitive(p)) => Ok(Some(p)),
            Some(other) => Err(Error::new(ErrorKind::TypeMismatch {
                expected: "primitive",
                actual: other.tag(),
            })),
        }
    }

    /// As [`Self::get`], but requires the matching child be constructed.
    pub fn get_constructed(&self, tag: Tag) -> Result<Option<&Constructed>> {
        self.get_constructed_nth(tag, 0)
    }

    /// As [`Self::get_nth`], but requires the matching child be constructed.
    pub fn get_constructed_nth(&self, tag: Tag, n: usize) -> Result<Option<&Constructed>> {
        match self.get_nth(tag, n) {
            None => Ok(None),
            Some(BerTlv::Constructed(c)) => Ok(Some(c)),
            Some(other) => Err(Error::new(ErrorKind::TypeMismatch {
                expected: "constructed",
                actual: other.tag(),
            })),
        }
    }

    /// The child at ordinal position `n` (0-based, scanning all children
    /// regardless of tag), if it is primitive and carries `expected_number`
    /// as a UNIVERSAL-class tag.
    fn primitive_at(&self, n: usize, expected_number: u64, expected_name: &'static str) -> Result<&Primitive> {
        match self.children().get(n) {
            None => Err(Error::new(ErrorKind::NotFound)),
            Some(BerTlv::Primitive(p))
                if p.tag().class() == crate::tag::Class::Universal && p.tag().number() == expected_number =>
            {
                Ok(p)
            }
            Some(other) => Err(Error::new(ErrorKind::TypeMismatch {
                expected: expected_name,
                actual: other.tag(),
            })),
        }
    }

    /// The child at ordinal position `n` (0-based, scanning all children
    /// regardless of tag), if it is constructed and carries
    /// `expected_number` as a UNIVERSAL-class tag.
    fn constructed_at(&self, n: usize, expected_number: u64, expected_name: &'static str) -> Result<&Constructed> {
        match self.children().get(n) {
            None => Err(Error::new(ErrorKind::NotFound)),
            Some(BerTlv::Constructed(c))
                if c.tag().class() == crate::tag::Class::Universal && c.tag().number() == expected_number =>
            {
                Ok(c)
            }
            Some(other) => Err(Error::new(ErrorKind::TypeMismatch {
                expected: expected_name,
                actual: other.tag(),
            })),
        }
    }
}

/// Implements the nullary/unary(n) typed-accessor pair for a
/// [`SpecificPrimitive`] type, searching children by the type's implicit
/// UNIVERSAL tag (nullary) or by ordinal position (unary), per spec §4.5.
macro_rules! typed_primitive_accessor {
    ($nullary:ident, $unary:ident, $ty:ty) => {
        /// The single occurrence of this type's implicit tag among the
        /// children, or [`ErrorKind::NotFound`].
        pub fn $nullary(&self) -> Result<$ty> {
            let tag = Tag::new(crate::tag::Class::Universal, crate::tag::Form::Primitive, <$ty as SpecificPrimitive>::TAG_NUMBER)?;
            let p = self
                .get_primitive(tag)?
                .ok_or_else(|| Error::new(ErrorKind::NotFound))?;
            <$ty as SpecificPrimitive>::from_node(p)
        }

        /// The `(n+1)`-th child by ordinal position, requiring it decode as
        /// this type (wrong type ⇒ [`ErrorKind::TypeMismatch`]).
        pub fn $unary(&self, n: usize) -> Result<$ty> {
            let p = self.primitive_at(n, <$ty as SpecificPrimitive>::TAG_NUMBER, <$ty as SpecificPrimitive>::NAME)?;
            <$ty as SpecificPrimitive>::from_node(p)
        }
    };
}

/// As [`typed_primitive_accessor`], for a [`SpecificConstructed`] type.
macro_rules! typed_constructed_accessor {
    ($nullary:ident, $unary:ident, $ty:ty) => {
        /// The single occurrence of this type's implicit tag among the
        /// children, or [`ErrorKind::NotFound`].
        pub fn $nullary(&self) -> Result<$ty> {
            let tag = Tag::new(crate::tag::Class::Universal, crate::tag::Form::Constructed, <$ty as SpecificConstructed>::TAG_NUMBER)?;
            let c = self.get_constructed(tag)?.ok_or_else(|| Error::new(ErrorKind::NotFound))?;
            <$ty as SpecificConstructed>::from_node(c)
        }

        /// The `(n+1)`-th child by ordinal position, requiring it decode as
        /// this type (wrong type ⇒ [`ErrorKind::TypeMismatch`]).
        pub fn $unary(&self, n: usize) -> Result<$ty> {
            let c = self.constructed_at(n, <$ty as SpecificConstructed>::TAG_NUMBER, <$ty as SpecificConstructed>::NAME)?;
            <$ty as SpecificConstructed>::from_node(c)
        }
    };
}

impl Constructed {
    typed_primitive_accessor!(get_end_of_content, get_end_of_content_at, EndOfContent);
    typed_primitive_accessor!(get_boolean, get_boolean_at, Boolean);
    typed_primitive_accessor!(get_integer, get_integer_at, Integer);
    typed_primitive_accessor!(get_bit_string, get_bit_string_at, BitString);
    typed_primitive_accessor!(get_octet_string, get_octet_string_at, OctetString);
    typed_primitive_accessor!(get_null, get_null_at, Null);
    typed_primitive_accessor!(get_oid, get_oid_at, Oid);
    typed_primitive_accessor!(get_utf8_string, get_utf8_string_at, Utf8String);
    typed_primitive_accessor!(get_printable_string, get_printable_string_at, PrintableString);
    typed_primitive_accessor!(get_teletex_string, get_teletex_string_at, TeletexString);
    typed_primitive_accessor!(get_ia5_string, get_ia5_string_at, Ia5String);
    typed_primitive_accessor!(get_utc_time, get_utc_time_at, UtcTime);
    typed_primitive_accessor!(get_date, get_date_at, Date);

    typed_constructed_accessor!(get_sequence, get_sequence_at, Sequence);
    typed_constructed_accessor!(get_set, get_set_at, Set);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Primitive;

    fn sample() -> Constructed {
        Constructed::from(
            Tag::SEQUENCE,
            vec![
                BerTlv::Primitive(Primitive::new(Tag::BOOLEAN, vec![0xff]).unwrap()),
                BerTlv::Primitive(Primitive::new(Tag::INTEGER, vec![0x2a]).unwrap()),
                BerTlv::Primitive(Primitive::new(Tag::INTEGER, vec![0x2b]).unwrap()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn get_by_tag_is_stable_under_insertion_order() {
        let s = sample();
        assert_eq!(s.get_nth(Tag::INTEGER, 0).unwrap().tag(), Tag::INTEGER);
        assert_eq!(
            s.get_primitive_nth(Tag::INTEGER, 1).unwrap().unwrap().value(),
            &[0x2b]
        );
        assert!(s.get(Tag::OCTET_STRING).is_none());
    }

    #[test]
    fn typed_nullary_and_unary_accessors() {
        let s = sample();
        assert!(s.get_boolean().unwrap().value());
        assert_eq!(s.get_integer_at(1).unwrap().as_bytes(), &[0x2a]);
        assert!(matches!(
            s.get_integer_at(0).unwrap_err().kind(),
            ErrorKind::TypeMismatch { .. }
        ));
        assert!(matches!(s.get_oid().unwrap_err().kind(), ErrorKind::NotFound));
    }
}
