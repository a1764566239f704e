//! `TeletexString` (UNIVERSAL 20, primitive): decoded via a T.61 code table
//! (ITU-T T.61), not raw ASCII.

use crate::node::Primitive;
use crate::specific::{SpecificPrimitive, SUBSTITUTION_CHAR};
use crate::tag::Tag;

/// Maps a single T.61 code point to its Unicode equivalent, or `None` if the
/// byte has no defined mapping in this table's subset.
///
/// The non-spacing-diacritic region (`0xC1..=0xCF`) and most of the
/// graphics/private-use region are left unmapped; real-world TeletexString
/// values overwhelmingly stay within 7-bit Latin text plus a handful of
/// accented letters, which this table covers.
fn t61_to_char(byte: u8) -> Option<char> {
    match byte {
        0x00..=0x7f => match byte {
            // T.61 reassigns a handful of ASCII positions; everything else
            // is identical to US-ASCII/ISO-646.
            0x24 => Some('¤'),
            0x5c => Some('¥'),
            0x5e => Some('‾'),
            0x60 => Some('‘'),
            0x7e => Some('‖'),
            _ => Some(byte as char),
        },
        0xa1 => Some('¡'),
        0xa2 => Some('¢'),
        0xa3 => Some('£'),
        0xa5 => Some('¥'),
        0xa7 => Some('§'),
        0xa4 => Some('¤'),
        0xa6 => Some('¦'),
        0xab => Some('«'),
        0xb0 => Some('°'),
        0xb1 => Some('±'),
        0xb2 => Some('²'),
        0xb3 => Some('³'),
        0xb5 => Some('µ'),
        0xb6 => Some('¶'),
        0xb7 => Some('·'),
        0xbb => Some('»'),
        0xbc => Some('¼'),
        0xbd => Some('½'),
        0xbf => Some('¿'),
        _ => None,
    }
}

/// A decoded `TeletexString` value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeletexString {
    value: String,
    findings: Vec<String>,
}

impl TeletexString {
    /// Build a `TeletexString` from a Rust string, without validating its
    /// character set.
    pub fn from_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            findings: Vec::new(),
        }
    }

    /// The decoded text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Encode this value as its canonical node (the ASCII subset only;
    /// round-tripping the full T.61 table is out of scope here).
    pub fn to_node(&self) -> Primitive {
        Primitive::new(Tag::TELETEX_STRING, self.value.clone().into_bytes())
            .expect("TeletexString tag is always primitive")
    }
}

impl SpecificPrimitive for TeletexString {
    const TAG_NUMBER: u64 = 20;
    const NAME: &'static str = "TeletexString";

    fn from_node(node: &Primitive) -> crate::error::Result<Self> {
        let mut findings = Vec::new();
        let mut value = String::with_capacity(node.value().len());
        for &byte in node.value() {
            match t61_to_char(byte) {
                Some(c) => value.push(c),
                None => value.push(SUBSTITUTION_CHAR),
            }
        }
        if value.contains(SUBSTITUTION_CHAR) {
            findings.push("value field contains bytes with no defined T.61 mapping".to_string());
        }
        Ok(Self { value, findings })
    }

    fn findings(&self) -> &[String] {
        &self.findings
    }

    fn comment(&self) -> String {
        format!("TeletexString := {:?}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_subset_roundtrips() {
        let s = TeletexString::from_value("Hello World");
        let node = s.to_node();
        let decoded = TeletexString::from_node(&node).unwrap();
        assert_eq!(decoded, s);
        assert!(decoded.is_valid());
    }

    #[test]
    fn unmapped_byte_is_substituted() {
        let node = Primitive::new(Tag::TELETEX_STRING, vec![b'A', 0xff, b'B']).unwrap();
        let s = TeletexString::from_node(&node).unwrap();
        assert!(!s.is_valid());
        assert_eq!(s.value(), format!("A{SUBSTITUTION_CHAR}B"));
    }
}
