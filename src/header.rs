//! Tag + length pair: the prefix that precedes every value field.

use crate::error::Result;
use crate::length::{self, Length};
use crate::reader::Reader;
use crate::tag::Tag;
use crate::writer::Writer;

/// The tag and length fields of a TLV, i.e. everything that precedes the
/// value field. Computed on demand from a [`crate::node::BerTlv`] rather
/// than stored as independent mutable state (see `SPEC_FULL.md` §3: the
/// source's `tag_length_prefix` inconsistency between constructor-built and
/// post-edit state is resolved here by never storing it).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Header {
    /// The tag.
    pub tag: Tag,
    /// The length of the value field that follows.
    pub length: Length,
}

impl Header {
    /// Build a header from a tag and value length.
    pub fn new(tag: Tag, length: Length) -> Self {
        Self { tag, length }
    }

    /// Total encoded size of this tag+length prefix.
    pub fn encoded_len(&self) -> Result<Length> {
        let tag_len = u64::try_from(self.tag.encoded_len()?)?;
        let length_len = self.length.field_size() as u64;
        Length::new(tag_len + length_len)
    }

    /// Emit the tag then the length to `writer`.
    pub fn encode(&self, writer: &mut impl Writer) -> Result<()> {
        self.tag.encode(writer)?;
        length::write_length(self.length, writer)
    }

    /// Decode a tag then a length from `reader`.
    ///
    /// Returns the header plus the number of octets consumed by the length
    /// field alone (the tag's own length is available via
    /// `header.tag.encoded_len()`).
    pub fn decode<'r, R: Reader<'r>>(reader: &mut R) -> Result<(Self, usize)> {
        let tag = Tag::decode(reader)?;
        let (length, length_field_len) = length::read_length(reader)?;
        Ok((Self { tag, length }, length_field_len))
    }
}
