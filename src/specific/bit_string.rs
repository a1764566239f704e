//! `BIT STRING` (UNIVERSAL 3). Only the primitive form is modeled here;
//! the constructed (fragmented) form described by X.690 §8.6.3 is out of
//! scope (see spec §1 non-goals on schema-level validation).

use crate::error::{Error, ErrorKind, Result};
use crate::node::Primitive;
use crate::specific::SpecificPrimitive;
use crate::tag::Tag;

/// A decoded `BIT STRING` value: a byte string plus a count of unused
/// trailing bits in the final octet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitString {
    unused_bits: u8,
    bits: Vec<u8>,
    findings: Vec<String>,
}

impl BitString {
    /// Build a `BIT STRING` from its bytes and unused-bit count (`0..=7`).
    pub fn from_value(unused_bits: u8, bits: impl Into<Vec<u8>>) -> Self {
        Self {
            unused_bits,
            bits: bits.into(),
            findings: Vec::new(),
        }
    }

    /// Number of unused bits in the final octet (`0..=7`).
    pub fn unused_bits(&self) -> u8 {
        self.unused_bits
    }

    /// The bit-string content octets.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Encode this value as its canonical node.
    pub fn to_node(&self) -> Primitive {
        let mut value = Vec::with_capacity(1 + self.bits.len());
        value.push(self.unused_bits);
        value.extend_from_slice(&self.bits);
        Primitive::new(Tag::BIT_STRING, value).expect("BIT STRING tag is always primitive")
    }
}

impl SpecificPrimitive for BitString {
    const TAG_NUMBER: u64 = 3;
    const NAME: &'static str = "BIT STRING";

    fn from_node(node: &Primitive) -> Result<Self> {
        let raw = node.value();
        let Some((&unused_bits, bits)) = raw.split_first() else {
            return Err(Error::new(ErrorKind::MalformedEncoding(
                crate::error::EncodingReason::EmptyValueField,
            )));
        };

        let mut findings = Vec::new();
        if unused_bits > 7 {
            findings.push(format!("unused-bits count {unused_bits} exceeds 7"));
        }
        if bits.is_empty() && unused_bits != 0 {
            findings.push("unused-bits count must be 0 when the bit string is empty".to_string());
        }

        Ok(Self {
            unused_bits,
            bits: bits.to_vec(),
            findings,
        })
    }

    fn findings(&self) -> &[String] {
        &self.findings
    }

    fn comment(&self) -> String {
        format!(
            "BIT STRING := {} bytes, {} unused bits",
            self.bits.len(),
            self.unused_bits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bits_require_zero_unused() {
        let node = Primitive::new(Tag::BIT_STRING, vec![0x03]).unwrap();
        let bs = BitString::from_node(&node).unwrap();
        assert!(!bs.is_valid());
    }

    #[test]
    fn roundtrip() {
        let bs = BitString::from_value(4, vec![0xF0]);
        assert_eq!(bs.to_node().to_vec().unwrap(), vec![0x03, 0x02, 0x04, 0xF0]);
    }
}
