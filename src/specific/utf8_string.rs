//! `UTF8String` (UNIVERSAL 12, primitive).

use crate::node::Primitive;
use crate::specific::{SpecificPrimitive, SUBSTITUTION_CHAR};
use crate::tag::Tag;

/// A decoded `UTF8String` value.
///
/// Invalid UTF-8 sequences are replaced with [`SUBSTITUTION_CHAR`] and
/// recorded as a finding rather than rejected outright (spec §4.4).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utf8String {
    value: String,
    findings: Vec<String>,
}

impl Utf8String {
    /// Build a `UTF8String` from a Rust string.
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

    /// Encode this value as its canonical node.
    pub fn to_node(&self) -> Primitive {
        Primitive::new(Tag::UTF8_STRING, self.value.clone().into_bytes())
            .expect("UTF8String tag is always primitive")
    }
}

impl SpecificPrimitive for Utf8String {
    const TAG_NUMBER: u64 = 12;
    const NAME: &'static str = "UTF8String";

    fn from_node(node: &Primitive) -> crate::error::Result<Self> {
        match core::str::from_utf8(node.value()) {
            Ok(s) => Ok(Self {
                value: s.to_string(),
                findings: Vec::new(),
            }),
            Err(_) => {
                let lossy = String::from_utf8_lossy(node.value()).replace('\u{fffd}', &SUBSTITUTION_CHAR.to_string());
                Ok(Self {
                    value: lossy,
                    findings: vec!["value field is not valid UTF-8".to_string()],
                })
            }
        }
    }

    fn findings(&self) -> &[String] {
        &self.findings
    }

    fn comment(&self) -> String {
        format!("UTF8String := {:?}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_is_substituted() {
        let node = Primitive::new(Tag::UTF8_STRING, vec![0x41, 0xff, 0x42]).unwrap();
        let s = Utf8String::from_node(&node).unwrap();
        assert!(!s.is_valid());
        assert!(s.value().contains(SUBSTITUTION_CHAR));
    }

    #[test]
    fn roundtrip() {
        let s = Utf8String::from_value("héllo");
        let node = s.to_node();
        let decoded = Utf8String::from_node(&node).unwrap();
        assert_eq!(decoded, s);
    }
}
