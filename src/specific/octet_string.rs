//! `OCTET STRING` (UNIVERSAL 4, primitive).

use crate::error::Result;
use crate::node::Primitive;
use crate::specific::SpecificPrimitive;
use crate::tag::Tag;

/// A decoded `OCTET STRING` value: an arbitrary byte string, no validation
/// beyond its length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OctetString {
    value: Vec<u8>,
    findings: Vec<String>,
}

impl OctetString {
    /// Build an `OCTET STRING` from raw bytes.
    pub fn from_value(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value: value.into(),
            findings: Vec::new(),
        }
    }

    /// The byte content.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Encode this value as its canonical node.
    pub fn to_node(&self) -> Primitive {
        Primitive::new(Tag::OCTET_STRING, self.value.clone())
            .expect("OCTET STRING tag is always primitive")
    }
}

impl SpecificPrimitive for OctetString {
    const TAG_NUMBER: u64 = 4;
    const NAME: &'static str = "OCTET STRING";

    fn from_node(node: &Primitive) -> Result<Self> {
        let mut findings = Vec::new();
        if let Some(meta) = node.read_metadata() {
            let minimal_len = crate::length::Length::Definite(node.value().len() as u64).field_size();
            if meta.length_of_length_field_from_stream != minimal_len {
                findings.push("non-minimal length encoding".to_string());
            }
        }
        Ok(Self {
            value: node.value().to_vec(),
            findings,
        })
    }

    fn findings(&self) -> &[String] {
        &self.findings
    }

    fn comment(&self) -> String {
        format!("OCTET STRING := {} bytes", self.value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_node;
    use crate::reader::SliceReader;

    #[test]
    fn non_minimal_length_scenario() {
        let bytes = [0x04, 0x81, 0x03, 0x11, 0x22, 0x33];
        let mut r = SliceReader::new(&bytes);
        let node = decode_node(&mut r).unwrap();
        let p = node.as_primitive().unwrap();
        let os = OctetString::from_node(p).unwrap();
        assert_eq!(os.value(), &[0x11, 0x22, 0x33]);
        assert_eq!(os.findings(), &["non-minimal length encoding".to_string()]);
        // Even the generic re-encode is minimal, since the length field is
        // always re-derived from the stored value's byte count.
        assert_eq!(node.to_vec().unwrap(), vec![0x04, 0x03, 0x11, 0x22, 0x33]);
    }
}
