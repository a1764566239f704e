//! `BOOLEAN` (UNIVERSAL 1, primitive).

use crate::error::Result;
use crate::node::Primitive;
use crate::specific::SpecificPrimitive;
use crate::tag::Tag;

/// A decoded `BOOLEAN` value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Boolean {
    value: bool,
    findings: Vec<String>,
}

impl Boolean {
    /// Build a `BOOLEAN` from a semantic value (no findings).
    pub fn from_value(value: bool) -> Self {
        Self {
            value,
            findings: Vec::new(),
        }
    }

    /// The decoded value.
    pub fn value(&self) -> bool {
        self.value
    }

    /// Encode this value as its canonical (1-byte) node.
    pub fn to_node(&self) -> Primitive {
        Primitive::new(Tag::BOOLEAN, vec![if self.value { 0xFF } else { 0x00 }])
            .expect("BOOLEAN tag is always primitive")
    }
}

impl SpecificPrimitive for Boolean {
    const TAG_NUMBER: u64 = 1;
    const NAME: &'static str = "BOOLEAN";

    fn from_node(node: &Primitive) -> Result<Self> {
        let mut findings = Vec::new();

        if node.value().len() != 1 {
            findings.push("length of value-field unequal to 1".to_string());
        }
        if let Some(meta) = node.read_metadata() {
            if meta.length_of_length_field_from_stream != 1 {
                findings.push("non-'01' length encoding".to_string());
            }
        }

        let value = match node.value().first() {
            Some(0x00) => false,
            Some(_) => true,
            // An empty value-field has no truth-indicating byte; BER leaves
            // this undefined, so we default to `false` and let the
            // length finding above carry the diagnostic.
            None => false,
        };

        Ok(Self { value, findings })
    }

    fn findings(&self) -> &[String] {
        &self.findings
    }

    fn comment(&self) -> String {
        format!("BOOLEAN := {}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_node;
    use crate::reader::SliceReader;

    #[test]
    fn canonical_roundtrip() {
        let b = Boolean::from_value(true);
        assert_eq!(b.to_node().to_vec().unwrap(), vec![0x01, 0x01, 0xFF]);
    }

    #[test]
    fn non_minimal_length_is_a_finding() {
        let bytes = [0x01, 0x02, 0xFF, 0x00];
        let mut r = SliceReader::new(&bytes);
        let node = decode_node(&mut r).unwrap();
        let p = node.as_primitive().unwrap();
        let b = Boolean::from_node(p).unwrap();
        assert!(b.value());
        assert_eq!(b.findings(), &["length of value-field unequal to 1".to_string()]);
        assert!(!b.is_valid());
        // Generic re-serialization is verbatim (preserves the as-read
        // bytes); the canonical/minimal form comes from the specific type.
        assert_eq!(node.to_vec().unwrap(), bytes.to_vec());
        assert_eq!(b.to_node().to_vec().unwrap(), vec![0x01, 0x01, 0xFF]);
    }
}
