//! The [`BerTlv`] tree: the polymorphic Primitive/Constructed node model.

use crate::error::{Error, ErrorKind, EncodingReason, Result};
use crate::header::Header;
use crate::length::Length;
use crate::reader::Reader;
use crate::tag::{Form, Tag};
use crate::writer::Writer;
use std::sync::Arc;

/// As-read metadata captured only when a node was produced by decoding a
/// byte stream (never present on nodes built from semantic constructors).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReadMetadata {
    /// `true` if the source encoded this node's length as `0x80`
    /// (indefinite form, terminated by an End-of-Content marker).
    pub indefinite_form: bool,
    /// Octet count consumed by the length field as read from the stream.
    pub length_of_length_field_from_stream: usize,
    /// Octet count consumed by the value field as read from the stream,
    /// including the trailing End-of-Content marker for indefinite-form
    /// constructed nodes.
    pub length_of_value_field_from_stream: usize,
}

/// A human-readable comment plus machine-readable findings, attached by the
/// specific-types layer at decode time so the tree printer can annotate
/// nodes without every caller re-deriving the specific type. See
/// [`crate::specific`].
#[derive(Clone, Debug, Default)]
pub struct Annotation {
    /// A short end-of-line comment, e.g. `"BOOLEAN := true"`.
    pub comment: Option<String>,
    /// Tolerated encoding deviations recorded while decoding this node.
    pub findings: Vec<String>,
}

impl Annotation {
    /// `true` iff there are no findings.
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }
}

/// A leaf node: a tag and a contiguous value.
#[derive(Clone, Debug)]
pub struct Primitive {
    pub(crate) tag: Tag,
    pub(crate) value: Arc<[u8]>,
    pub(crate) read_meta: Option<ReadMetadata>,
    pub(crate) annotation: Option<Annotation>,
}

impl Primitive {
    /// Build a primitive node from a tag and value bytes.
    ///
    /// Fails with [`ErrorKind::MalformedEncoding`] if `tag` has constructed
    /// form.
    pub fn new(tag: Tag, value: impl Into<Vec<u8>>) -> Result<Self> {
        if tag.is_constructed() {
            return Err(Error::new(ErrorKind::MalformedEncoding(
                EncodingReason::PrimitiveTagForConstructed,
            )));
        }
        Ok(Self {
            tag,
            value: Arc::from(value.into()),
            read_meta: None,
            annotation: None,
        })
    }

    /// The tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The value bytes.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// As-read metadata, if this node came from decoding a stream.
    pub fn read_metadata(&self) -> Option<ReadMetadata> {
        self.read_meta
    }

    /// The specific-type annotation attached at decode time, if any.
    pub fn annotation(&self) -> Option<&Annotation> {
        self.annotation.as_ref()
    }

    /// `length_of_value_field` per §3.3: the length of `value`.
    pub fn length_of_value_field(&self) -> u64 {
        self.value.len() as u64
    }

    /// Total encoded size of tag + length + value.
    pub fn tlv_size(&self) -> Result<Length> {
        let header = Header::new(self.tag, Length::new(self.length_of_value_field())?);
        header.encoded_len()?.checked_add(self.value.len() as u64)
    }

    /// Encode this node's canonical (minimal-length) bytes.
    pub fn encode(&self, writer: &mut impl Writer) -> Result<()> {
        let header = Header::new(self.tag, Length::new(self.length_of_value_field())?);
        header.encode(writer)?;
        writer.write_bytes(&self.value)
    }

    /// Encode to an owned byte vector.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut w = crate::writer::VecWriter::with_capacity(self.value.len() + 8);
        self.encode(&mut w)?;
        Ok(w.into_vec())
    }

    pub(crate) fn with_read_metadata(mut self, meta: ReadMetadata) -> Self {
        self.read_meta = Some(meta);
        self
    }

    pub(crate) fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = Some(annotation);
        self
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.value == other.value
    }
}
impl Eq for Primitive {}

/// An internal node: a tag and an ordered, immutable sequence of children.
#[derive(Clone, Debug)]
pub struct Constructed {
    pub(crate) tag: Tag,
    pub(crate) children: Arc<Vec<BerTlv>>,
    pub(crate) read_meta: Option<ReadMetadata>,
    pub(crate) annotation: Option<Annotation>,
}

impl Constructed {
    /// Build a constructed node from a tag and its children.
    ///
    /// Fails with [`ErrorKind::MalformedEncoding`] if `tag` has primitive
    /// form, or [`ErrorKind::LengthOverflow`] if the children's combined
    /// size exceeds [`crate::length::MAX_LENGTH`].
    pub fn from(tag: Tag, children: Vec<BerTlv>) -> Result<Self> {
        if tag.is_primitive() {
            return Err(Error::new(ErrorKind::MalformedEncoding(
                EncodingReason::PrimitiveTagForConstructed,
            )));
        }
        // Validate the accumulated size fits, even though we don't cache it.
        Self::value_field_length(&children)?;
        Ok(Self {
            tag,
            children: Arc::new(children),
            read_meta: None,
            annotation: None,
        })
    }

    /// Parse `bytes` as a bare concatenation of TLVs (no surrounding tag)
    /// and build a constructed node's child list from them.
    ///
    /// Fails with [`ErrorKind::MalformedEncoding`] on any trailing partial
    /// TLV.
    pub fn from_value_bytes(tag: Tag, bytes: &[u8]) -> Result<Self> {
        let mut reader = crate::reader::SliceReader::new(bytes);
        let mut children = Vec::new();
        while reader.remaining_len() != Some(0) {
            children.push(crate::decode::decode_node(&mut reader)?);
        }
        Self::from(tag, children)
    }

    fn value_field_length(children: &[BerTlv]) -> Result<Length> {
        let mut total = Length::ZERO;
        for child in children {
            total = total.checked_add(u64::try_from(child.tlv_size()?)?)?;
        }
        Ok(total)
    }

    /// The tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The children, in insertion order.
    pub fn children(&self) -> &[BerTlv] {
        &self.children
    }

    /// As-read metadata, if this node came from decoding a stream.
    pub fn read_metadata(&self) -> Option<ReadMetadata> {
        self.read_meta
    }

    /// The specific-type annotation attached at decode time, if any.
    pub fn annotation(&self) -> Option<&Annotation> {
        self.annotation.as_ref()
    }

    /// `length_of_value_field` per §3.3: the sum of children's TLV sizes.
    ///
    /// Every [`Constructed`] is validated at construction time (`from`,
    /// `add`) so this always succeeds; it falls back to `0` only if that
    /// invariant were somehow violated.
    pub fn length_of_value_field(&self) -> u64 {
        Self::value_field_length(&self.children)
            .ok()
            .and_then(|l| u64::try_from(l).ok())
            .unwrap_or(0)
    }

    /// Total encoded size of tag + length + (children's encoded bytes).
    pub fn tlv_size(&self) -> Result<Length> {
        let value_len = Self::value_field_length(&self.children)?;
        let header = Header::new(self.tag, value_len);
        header.encoded_len()?.checked_add(u64::try_from(value_len)?)
    }

    /// Return a new [`Constructed`] with `child` appended.
    ///
    /// The existing child list is shared (copy-on-write); only the new
    /// node allocates a fresh `Vec`.
    pub fn add(&self, child: BerTlv) -> Result<Self> {
        let mut children = (*self.children).clone();
        children.push(child);
        Self::value_field_length(&children)?;
        Ok(Self {
            tag: self.tag,
            children: Arc::new(children),
            read_meta: None,
            annotation: None,
        })
    }

    /// Encode this node's canonical (minimal-length, definite-form) bytes.
    pub fn encode(&self, writer: &mut impl Writer) -> Result<()> {
        let value_len = Self::value_field_length(&self.children)?;
        let header = Header::new(self.tag, value_len);
        header.encode(writer)?;
        for child in self.children.iter() {
            child.encode(writer)?;
        }
        Ok(())
    }

    /// Encode this node using the indefinite-length form, terminated by an
    /// explicit End-of-Content marker. See spec §8 "Indefinite equivalence".
    pub fn encode_indefinite(&self, writer: &mut impl Writer) -> Result<()> {
        let header = Header::new(self.tag, Length::Indefinite);
        header.encode(writer)?;
        for child in self.children.iter() {
            child.encode(writer)?;
        }
        writer.write_bytes(&[0x00, 0x00])
    }

    /// Encode to an owned byte vector.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut w = crate::writer::VecWriter::new();
        self.encode(&mut w)?;
        Ok(w.into_vec())
    }

    pub(crate) fn with_read_metadata(mut self, meta: ReadMetadata) -> Self {
        self.read_meta = Some(meta);
        self
    }

    pub(crate) fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = Some(annotation);
        self
    }
}

impl PartialEq for Constructed {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.children == other.children
    }
}
impl Eq for Constructed {}

/// A BER-TLV node: either a [`Primitive`] leaf or a [`Constructed`] subtree.
///
/// Nodes are immutable once built; [`Constructed::add`] returns a new node
/// rather than mutating in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BerTlv {
    /// A leaf node.
    Primitive(Primitive),
    /// An internal node.
    Constructed(Constructed),
}

impl BerTlv {
    /// The node's tag, regardless of variant.
    pub fn tag(&self) -> Tag {
        match self {
            BerTlv::Primitive(p) => p.tag(),
            BerTlv::Constructed(c) => c.tag(),
        }
    }

    /// `true` if this is a [`BerTlv::Primitive`].
    pub fn is_primitive(&self) -> bool {
        matches!(self, BerTlv::Primitive(_))
    }

    /// `true` if this is a [`BerTlv::Constructed`].
    pub fn is_constructed(&self) -> bool {
        matches!(self, BerTlv::Constructed(_))
    }

    /// Borrow as a [`Primitive`], if this node is one.
    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            BerTlv::Primitive(p) => Some(p),
            BerTlv::Constructed(_) => None,
        }
    }

    /// Borrow as a [`Constructed`], if this node is one.
    pub fn as_constructed(&self) -> Option<&Constructed> {
        match self {
            BerTlv::Constructed(c) => Some(c),
            BerTlv::Primitive(_) => None,
        }
    }

    /// `length_of_value_field` per §3.3, regardless of variant.
    pub fn length_of_value_field(&self) -> u64 {
        match self {
            BerTlv::Primitive(p) => p.length_of_value_field(),
            BerTlv::Constructed(c) => c.length_of_value_field(),
        }
    }

    /// As-read metadata, if this node came from decoding a stream.
    pub fn read_metadata(&self) -> Option<ReadMetadata> {
        match self {
            BerTlv::Primitive(p) => p.read_metadata(),
            BerTlv::Constructed(c) => c.read_metadata(),
        }
    }

    /// The specific-type annotation attached at decode time, if any.
    pub fn annotation(&self) -> Option<&Annotation> {
        match self {
            BerTlv::Primitive(p) => p.annotation(),
            BerTlv::Constructed(c) => c.annotation(),
        }
    }

    /// `true` iff this node has no recorded findings (nodes with no
    /// annotation at all — e.g. APPLICATION/CONTEXT/PRIVATE tags — are
    /// always considered valid).
    pub fn is_valid(&self) -> bool {
        self.annotation().map(Annotation::is_valid).unwrap_or(true)
    }

    /// Total encoded size of tag + length + value.
    pub fn tlv_size(&self) -> Result<Length> {
        match self {
            BerTlv::Primitive(p) => p.tlv_size(),
            BerTlv::Constructed(c) => c.tlv_size(),
        }
    }

    /// Encode this node's canonical (minimal-length, definite-form) bytes.
    pub fn encode(&self, writer: &mut impl Writer) -> Result<()> {
        match self {
            BerTlv::Primitive(p) => p.encode(writer),
            BerTlv::Constructed(c) => c.encode(writer),
        }
    }

    /// Encode to an owned byte vector.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        match self {
            BerTlv::Primitive(p) => p.to_vec(),
            BerTlv::Constructed(c) => c.to_vec(),
        }
    }
}

impl From<Primitive> for BerTlv {
    fn from(p: Primitive) -> Self {
        BerTlv::Primitive(p)
    }
}

impl From<Constructed> for BerTlv {
    fn from(c: Constructed) -> Self {
        BerTlv::Constructed(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Class;

    #[test]
    fn primitive_rejects_constructed_tag() {
        let tag = Tag::new(Class::Universal, Form::Constructed, 16).unwrap();
        assert!(Primitive::new(tag, vec![]).is_err());
    }

    #[test]
    fn constructed_rejects_primitive_tag() {
        let tag = Tag::new(Class::Universal, Form::Primitive, 2).unwrap();
        assert!(Constructed::from(tag, vec![]).is_err());
    }

    #[test]
    fn add_is_copy_on_write() {
        let seq = Constructed::from(Tag::SEQUENCE, vec![]).unwrap();
        let child = Primitive::new(Tag::INTEGER, vec![0x01]).unwrap();
        let seq2 = seq.add(BerTlv::Primitive(child)).unwrap();
        assert_eq!(seq.children().len(), 0);
        assert_eq!(seq2.children().len(), 1);
    }

    #[test]
    fn nested_tlv_size_matches_spec_example() {
        // `A1 07 87 01 99 81 02 12 34`
        let inner1 = Primitive::new(
            Tag::new(Class::ContextSpecific, Form::Primitive, 7).unwrap(),
            vec![0x99],
        )
        .unwrap();
        let inner2 = Primitive::new(
            Tag::new(Class::ContextSpecific, Form::Primitive, 1).unwrap(),
            vec![0x12, 0x34],
        )
        .unwrap();
        let outer = Constructed::from(
            Tag::new(Class::ContextSpecific, Form::Constructed, 1).unwrap(),
            vec![BerTlv::Primitive(inner1), BerTlv::Primitive(inner2)],
        )
        .unwrap();
        assert_eq!(outer.length_of_value_field(), 7);
        assert_eq!(outer.to_vec().unwrap(), vec![0xA1, 0x07, 0x87, 0x01, 0x99, 0x81, 0x02, 0x12, 0x34]);
    }
}
