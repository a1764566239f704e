//! The specific-types layer: strongly typed, UNIVERSAL-class views over
//! [`crate::node::Primitive`]/[`crate::node::Constructed`] nodes, each
//! carrying a decoded semantic value and a list of tolerated-deviation
//! findings (spec §4.4, §4.6).

pub mod bit_string;
pub mod boolean;
pub mod date;
pub mod end_of_content;
pub mod ia5_string;
pub mod integer;
pub mod null;
pub mod octet_string;
pub mod oid;
pub mod printable_string;
pub mod sequence;
pub mod set;
pub mod teletex_string;
pub mod utc_time;
pub mod utf8_string;

pub use bit_string::BitString;
pub use boolean::Boolean;
pub use date::Date;
pub use end_of_content::EndOfContent;
pub use ia5_string::Ia5String;
pub use integer::Integer;
pub use null::Null;
pub use octet_string::OctetString;
pub use oid::Oid;
pub use printable_string::PrintableString;
pub use sequence::Sequence;
pub use set::Set;
pub use teletex_string::TeletexString;
pub use utc_time::UtcTime;
pub use utf8_string::Utf8String;

use crate::node::{Annotation, Constructed, Primitive};
use crate::tag::Class;

/// A specific type decoded from a [`Primitive`] node.
pub trait SpecificPrimitive: Sized {
    /// The implicit UNIVERSAL tag number this type decodes (e.g. `1` for BOOLEAN).
    const TAG_NUMBER: u64;
    /// The short name used in comments and error messages, e.g. `"BOOLEAN"`.
    const NAME: &'static str;

    /// Decode the semantic value and findings from an already-read node.
    fn from_node(node: &Primitive) -> crate::error::Result<Self>;

    /// The findings recorded while decoding.
    fn findings(&self) -> &[String];

    /// A short end-of-line comment describing the decoded value.
    fn comment(&self) -> String;

    /// `true` iff there are no findings.
    fn is_valid(&self) -> bool {
        self.findings().is_empty()
    }
}

/// A specific type decoded from a [`Constructed`] node (SEQUENCE, SET).
pub trait SpecificConstructed: Sized {
    /// The implicit UNIVERSAL tag number this type decodes.
    const TAG_NUMBER: u64;
    /// The short name used in comments and error messages.
    const NAME: &'static str;

    /// Decode findings from an already-read node (SEQUENCE/SET carry no
    /// additional decoded value beyond their children).
    fn from_node(node: &Constructed) -> crate::error::Result<Self>;

    /// The findings recorded while decoding.
    fn findings(&self) -> &[String];

    /// A short end-of-line comment describing the node (e.g. element count).
    fn comment(&self) -> String;

    /// `true` iff there are no findings.
    fn is_valid(&self) -> bool {
        self.findings().is_empty()
    }
}

/// The registry consulted by the generic decoder (spec §4.6): only
/// `(class = UNIVERSAL, number)` pairs listed here get an annotation.
/// APPLICATION/CONTEXT-SPECIFIC/PRIVATE tags always return `None`.
pub fn annotate_primitive(node: &Primitive) -> Option<Annotation> {
    if node.tag().class() != Class::Universal {
        return None;
    }
    macro_rules! annotate {
        ($ty:ty) => {
            <$ty as SpecificPrimitive>::from_node(node)
                .ok()
                .map(|v| Annotation {
                    comment: Some(v.comment()),
                    findings: v.findings().to_vec(),
                })
        };
    }
    match node.tag().number() {
        0 => annotate!(EndOfContent),
        1 => annotate!(Boolean),
        2 => annotate!(Integer),
        3 => annotate!(BitString),
        4 => annotate!(OctetString),
        5 => annotate!(Null),
        6 => annotate!(Oid),
        12 => annotate!(Utf8String),
        19 => annotate!(PrintableString),
        20 => annotate!(TeletexString),
        22 => annotate!(Ia5String),
        23 => annotate!(UtcTime),
        31 => annotate!(Date),
        _ => None,
    }
}

/// Constructed-node counterpart of [`annotate_primitive`].
pub fn annotate_constructed(node: &Constructed) -> Option<Annotation> {
    if node.tag().class() != Class::Universal {
        return None;
    }
    macro_rules! annotate {
        ($ty:ty) => {
            <$ty as SpecificConstructed>::from_node(node)
                .ok()
                .map(|v| Annotation {
                    comment: Some(v.comment()),
                    findings: v.findings().to_vec(),
                })
        };
    }
    match node.tag().number() {
        16 => annotate!(Sequence),
        17 => annotate!(Set),
        _ => None,
    }
}

/// Substitution character used when a character-string specific type
/// encounters a byte sequence it cannot map (spec §4.4, §9).
pub const SUBSTITUTION_CHAR: char = '\u{2022}';
