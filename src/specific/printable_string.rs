//! `PrintableString` (UNIVERSAL 19, primitive).

use crate::node::Primitive;
use crate::specific::{SpecificPrimitive, SUBSTITUTION_CHAR};
use crate::tag::Tag;

fn is_printable(byte: u8) -> bool {
    matches!(byte,
        b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b' '
        | b'\'' | b'(' | b')' | b'+' | b',' | b'-' | b'.' | b'/' | b':' | b'=' | b'?'
    )
}

/// A decoded `PrintableString` value: restricted to the X.680 §41
/// `PrintableString` character set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrintableString {
    value: String,
    findings: Vec<String>,
}

impl PrintableString {
    /// Build a `PrintableString` from a Rust string, without validating its
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

    /// Encode this value as its canonical node.
    pub fn to_node(&self) -> Primitive {
        Primitive::new(Tag::PRINTABLE_STRING, self.value.clone().into_bytes())
            .expect("PrintableString tag is always primitive")
    }
}

impl SpecificPrimitive for PrintableString {
    const TAG_NUMBER: u64 = 19;
    const NAME: &'static str = "PrintableString";

    fn from_node(node: &Primitive) -> crate::error::Result<Self> {
        let mut findings = Vec::new();
        let mut value = String::with_capacity(node.value().len());
        for &byte in node.value() {
            if is_printable(byte) {
                value.push(byte as char);
            } else {
                value.push(SUBSTITUTION_CHAR);
            }
        }
        if value.contains(SUBSTITUTION_CHAR) {
            findings.push("value field contains bytes outside the PrintableString character set".to_string());
        }
        Ok(Self { value, findings })
    }

    fn findings(&self) -> &[String] {
        &self.findings
    }

    fn comment(&self) -> String {
        format!("PrintableString := {:?}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disallowed_byte_is_substituted() {
        let node = Primitive::new(Tag::PRINTABLE_STRING, vec![b'A', b'_', b'B']).unwrap();
        let s = PrintableString::from_node(&node).unwrap();
        assert!(!s.is_valid());
        assert_eq!(s.value(), format!("A{SUBSTITUTION_CHAR}B"));
    }

    #[test]
    fn roundtrip() {
        let s = PrintableString::from_value("Hello, World");
        let node = s.to_node();
        let decoded = PrintableString::from_node(&node).unwrap();
        assert_eq!(decoded, s);
        assert!(decoded.is_valid());
    }
}
