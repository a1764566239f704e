//! `INTEGER` (UNIVERSAL 2, primitive).

use crate::error::{Error, ErrorKind, Result};
use crate::node::Primitive;
use crate::specific::SpecificPrimitive;
use crate::tag::Tag;

/// A decoded `INTEGER` value: an arbitrary-precision signed big-endian
/// integer, represented as its minimal two's-complement byte encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Integer {
    /// Minimal (DER-canonical) two's-complement big-endian representation.
    bytes: Vec<u8>,
    findings: Vec<String>,
}

impl Integer {
    /// Build an `INTEGER` from an `i64`, using its minimal representation.
    pub fn from_i64(value: i64) -> Self {
        Self {
            bytes: minimal_twos_complement(&value.to_be_bytes()),
            findings: Vec::new(),
        }
    }

    /// Build an `INTEGER` from arbitrary two's-complement big-endian bytes,
    /// minimizing the representation (dropping redundant leading `0x00`/`0xFF`).
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::new(ErrorKind::MalformedEncoding(
                crate::error::EncodingReason::EmptyValueField,
            )));
        }
        Ok(Self {
            bytes: minimal_twos_complement(bytes),
            findings: Vec::new(),
        })
    }

    /// The minimal two's-complement big-endian byte representation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The value as an `i64`, if it fits.
    pub fn to_i64(&self) -> Option<i64> {
        if self.bytes.len() > 8 {
            return None;
        }
        let negative = self.bytes[0] & 0x80 != 0;
        let mut buf = [if negative { 0xFF } else { 0x00 }; 8];
        buf[8 - self.bytes.len()..].copy_from_slice(&self.bytes);
        Some(i64::from_be_bytes(buf))
    }

    /// Encode this value as its canonical (minimal) node.
    pub fn to_node(&self) -> Primitive {
        Primitive::new(Tag::INTEGER, self.bytes.clone()).expect("INTEGER tag is always primitive")
    }
}

/// Strip redundant leading `0x00` (if the next byte's sign bit is already
/// 0) or `0xFF` (if the next byte's sign bit is already 1) octets.
fn minimal_twos_complement(bytes: &[u8]) -> Vec<u8> {
    let mut start = 0;
    while start + 1 < bytes.len() {
        let (a, b) = (bytes[start], bytes[start + 1]);
        if a == 0x00 && b & 0x80 == 0 {
            start += 1;
        } else if a == 0xFF && b & 0x80 != 0 {
            start += 1;
        } else {
            break;
        }
    }
    bytes[start..].to_vec()
}

impl SpecificPrimitive for Integer {
    const TAG_NUMBER: u64 = 2;
    const NAME: &'static str = "INTEGER";

    fn from_node(node: &Primitive) -> Result<Self> {
        let raw = node.value();
        if raw.is_empty() {
            return Err(Error::new(ErrorKind::MalformedEncoding(
                crate::error::EncodingReason::EmptyValueField,
            )));
        }

        let minimal = minimal_twos_complement(raw);
        let mut findings = Vec::new();
        if minimal.len() != raw.len() {
            findings.push("redundant leading octet (non-minimal two's-complement encoding)".to_string());
        }

        Ok(Self {
            bytes: raw.to_vec(),
            findings,
        })
    }

    fn findings(&self) -> &[String] {
        &self.findings
    }

    fn comment(&self) -> String {
        match self.to_i64() {
            Some(v) => format!("INTEGER := {v}"),
            None => format!("INTEGER := 0x{}", hex_string(&self.bytes)),
        }
    }
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_round_trip() {
        for v in [-129i64, -128, -1, 0, 1, 127, 128, 255, 256, i64::MIN, i64::MAX] {
            let i = Integer::from_i64(v);
            assert_eq!(i.to_i64(), Some(v), "value {v}");
        }
    }

    #[test]
    fn non_minimal_leading_zero_is_a_finding() {
        let node = Primitive::new(Tag::INTEGER, vec![0x00, 0x01]).unwrap();
        let i = Integer::from_node(&node).unwrap();
        assert_eq!(i.to_i64(), Some(1));
        assert!(!i.is_valid());
    }

    #[test]
    fn minimal_is_valid() {
        let node = Primitive::new(Tag::INTEGER, vec![0x01]).unwrap();
        let i = Integer::from_node(&node).unwrap();
        assert!(i.is_valid());
    }
}
