//! `SEQUENCE` / `SEQUENCE OF` (UNIVERSAL 16, constructed).

use crate::error::Result;
use crate::node::{BerTlv, Constructed};
use crate::specific::SpecificConstructed;
use crate::tag::Tag;

/// A decoded `SEQUENCE`: an ordered list of children, no further validation
/// beyond the generic [`Constructed`] invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    children: Vec<BerTlv>,
}

impl Sequence {
    /// Build a `SEQUENCE` from its children.
    pub fn from_children(children: impl Into<Vec<BerTlv>>) -> Self {
        Self {
            children: children.into(),
        }
    }

    /// The children, in insertion order.
    pub fn children(&self) -> &[BerTlv] {
        &self.children
    }

    /// Encode this value as its canonical node.
    pub fn to_node(&self) -> Result<Constructed> {
        Constructed::from(Tag::SEQUENCE, self.children.clone())
    }
}

impl SpecificConstructed for Sequence {
    const TAG_NUMBER: u64 = 16;
    const NAME: &'static str = "SEQUENCE";

    fn from_node(node: &Constructed) -> Result<Self> {
        Ok(Self {
            children: node.children().to_vec(),
        })
    }

    fn findings(&self) -> &[String] {
        &[]
    }

    fn comment(&self) -> String {
        format!("SEQUENCE with {} elements", self.children.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Primitive;

    #[test]
    fn roundtrip() {
        let child = BerTlv::Primitive(Primitive::new(Tag::INTEGER, vec![0x01]).unwrap());
        let seq = Sequence::from_children(vec![child.clone()]);
        let node = seq.to_node().unwrap();
        let decoded = Sequence::from_node(&node).unwrap();
        assert_eq!(decoded.children(), &[child]);
        assert_eq!(decoded.comment(), "SEQUENCE with 1 elements");
    }
}
