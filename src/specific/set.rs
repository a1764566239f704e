//! `SET` / `SET OF` (UNIVERSAL 17, constructed).

use crate::error::Result;
use crate::node::{BerTlv, Constructed};
use crate::specific::SpecificConstructed;
use crate::tag::Tag;

/// A decoded `SET`: an ordered list of children as read from the stream.
///
/// DER's canonical-ordering requirement for `SET OF` elements is a
/// reencoding concern, not a decode-time validation (see §4.4); this type
/// preserves insertion order rather than sorting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Set {
    children: Vec<BerTlv>,
}

impl Set {
    /// Build a `SET` from its children.
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
        Constructed::from(Tag::SET, self.children.clone())
    }
}

impl SpecificConstructed for Set {
    const TAG_NUMBER: u64 = 17;
    const NAME: &'static str = "SET";

    fn from_node(node: &Constructed) -> Result<Self> {
        Ok(Self {
            children: node.children().to_vec(),
        })
    }

    fn findings(&self) -> &[String] {
        &[]
    }

    fn comment(&self) -> String {
        format!("SET with {} elements", self.children.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Primitive;

    #[test]
    fn roundtrip() {
        let child = BerTlv::Primitive(Primitive::new(Tag::BOOLEAN, vec![0xff]).unwrap());
        let set = Set::from_children(vec![child.clone()]);
        let node = set.to_node().unwrap();
        let decoded = Set::from_node(&node).unwrap();
        assert_eq!(decoded.children(), &[child]);
    }
}
