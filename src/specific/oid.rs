//! `OBJECT IDENTIFIER` (UNIVERSAL 6, primitive).

use crate::error::{Error, ErrorKind, Result};
use crate::node::Primitive;
use crate::specific::SpecificPrimitive;
use crate::tag::Tag;
use core::fmt;

/// A decoded `OBJECT IDENTIFIER` value: a sequence of non-negative arcs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Oid {
    arcs: Vec<u64>,
    findings: Vec<String>,
}

impl Oid {
    /// Build an OID from its arc sequence.
    ///
    /// Fails with [`ErrorKind::MalformedEncoding`] if fewer than two arcs
    /// are given, or the first arc is not in `{0, 1, 2}`, or (when the
    /// first arc is `0` or `1`) the second arc exceeds `39`.
    pub fn from_arcs(arcs: impl Into<Vec<u64>>) -> Result<Self> {
        let arcs = arcs.into();
        validate_arcs(&arcs)?;
        Ok(Self {
            arcs,
            findings: Vec::new(),
        })
    }

    /// The arc sequence.
    pub fn arcs(&self) -> &[u64] {
        &self.arcs
    }

    /// Encode this value as its canonical node.
    pub fn to_node(&self) -> Primitive {
        let mut value = Vec::new();
        value.extend(encode_base128(self.arcs[0] * 40 + self.arcs[1]));
        for &arc in &self.arcs[2..] {
            value.extend(encode_base128(arc));
        }
        Primitive::new(Tag::OID, value).expect("OID tag is always primitive")
    }
}

fn validate_arcs(arcs: &[u64]) -> Result<()> {
    if arcs.len() < 2 || arcs[0] > 2 || (arcs[0] < 2 && arcs[1] > 39) {
        return Err(Error::new(ErrorKind::MalformedEncoding(
            crate::error::EncodingReason::InvalidObjectIdentifier,
        )));
    }
    Ok(())
}

fn encode_base128(mut value: u64) -> Vec<u8> {
    let mut groups = Vec::new();
    loop {
        groups.push((value & 0x7f) as u8);
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    groups.reverse();
    let last = groups.len() - 1;
    for (i, g) in groups.iter_mut().enumerate() {
        if i != last {
            *g |= 0x80;
        }
    }
    groups
}

impl SpecificPrimitive for Oid {
    const TAG_NUMBER: u64 = 6;
    const NAME: &'static str = "OBJECT IDENTIFIER";

    fn from_node(node: &Primitive) -> Result<Self> {
        let raw = node.value();
        if raw.is_empty() {
            return Err(Error::new(ErrorKind::MalformedEncoding(
                crate::error::EncodingReason::EmptyValueField,
            )));
        }

        let mut findings = Vec::new();
        let mut arcs = Vec::new();
        let mut value: u64 = 0;
        let mut at_group_start = true;

        let mut iter = raw.iter().peekable();
        while let Some(&byte) = iter.next() {
            if at_group_start && byte == 0x80 {
                findings.push("non-minimal base-128 arc encoding (leading 0x80 padding)".to_string());
            }
            at_group_start = false;
            value = (value << 7) | (byte & 0x7f) as u64;
            if byte & 0x80 == 0 {
                arcs.push(value);
                value = 0;
                at_group_start = true;
            }
        }
        if !at_group_start {
            findings.push("truncated final arc (missing terminating byte)".to_string());
        }

        if arcs.is_empty() {
            return Err(Error::new(ErrorKind::MalformedEncoding(
                crate::error::EncodingReason::InvalidObjectIdentifier,
            )));
        }

        let first = arcs[0];
        let (arc1, arc2) = if first < 80 { (first / 40, first % 40) } else { (2, first - 80) };

        let mut decoded_arcs = vec![arc1, arc2];
        decoded_arcs.extend(&arcs[1..]);

        Ok(Self {
            arcs: decoded_arcs,
            findings,
        })
    }

    fn findings(&self) -> &[String] {
        &self.findings
    }

    fn comment(&self) -> String {
        format!("OBJECT IDENTIFIER := {self}")
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.arcs.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_oid_roundtrip() {
        // 1.2.840.113549 (rsadsi)
        let oid = Oid::from_arcs(vec![1, 2, 840, 113549]).unwrap();
        let node = oid.to_node();
        let decoded = Oid::from_node(&node).unwrap();
        assert_eq!(decoded, oid);
        assert!(decoded.is_valid());
        assert_eq!(oid.to_string(), "1.2.840.113549");
    }

    #[test]
    fn leading_zero_padding_is_a_finding() {
        let node = Primitive::new(Tag::OID, vec![0x80, 0x01]).unwrap();
        let decoded = Oid::from_node(&node).unwrap();
        assert!(!decoded.is_valid());
    }
}
