//! `IA5String` (UNIVERSAL 22, primitive).

use crate::node::Primitive;
use crate::specific::{SpecificPrimitive, SUBSTITUTION_CHAR};
use crate::tag::Tag;

/// A decoded `IA5String` value: restricted to 7-bit IA5 (ASCII) octets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ia5String {
    value: String,
    findings: Vec<String>,
}

impl Ia5String {
    /// Build an `IA5String` from a Rust string, without validating range.
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
        Primitive::new(Tag::IA5_STRING, self.value.clone().into_bytes())
            .expect("IA5String tag is always primitive")
    }
}

impl SpecificPrimitive for Ia5String {
    const TAG_NUMBER: u64 = 22;
    const NAME: &'static str = "IA5String";

    fn from_node(node: &Primitive) -> crate::error::Result<Self> {
        let mut findings = Vec::new();
        let mut value = String::with_capacity(node.value().len());
        for &byte in node.value() {
            if byte <= 0x7f {
                value.push(byte as char);
            } else {
                value.push(SUBSTITUTION_CHAR);
            }
        }
        if value.contains(SUBSTITUTION_CHAR) {
            findings.push("value field contains octets outside the 7-bit IA5 range".to_string());
        }
        Ok(Self { value, findings })
    }

    fn findings(&self) -> &[String] {
        &self.findings
    }

    fn comment(&self) -> String {
        format!("IA5String := {:?}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_bit_byte_is_substituted() {
        let node = Primitive::new(Tag::IA5_STRING, vec![b'A', 0xe9, b'B']).unwrap();
        let s = Ia5String::from_node(&node).unwrap();
        assert!(!s.is_valid());
        assert_eq!(s.value(), format!("A{SUBSTITUTION_CHAR}B"));
    }

    #[test]
    fn roundtrip() {
        let s = Ia5String::from_value("user@example.com");
        let node = s.to_node();
        let decoded = Ia5String::from_node(&node).unwrap();
        assert_eq!(decoded, s);
        assert!(decoded.is_valid());
    }
}
