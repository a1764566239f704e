//! `NULL` (UNIVERSAL 5, primitive).

use crate::node::Primitive;
use crate::specific::SpecificPrimitive;
use crate::tag::Tag;
use std::sync::OnceLock;

/// A decoded `NULL` value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Null {
    findings: Vec<String>,
}

static CANONICAL: OnceLock<Primitive> = OnceLock::new();

impl Null {
    /// The canonical `NULL` value (no findings).
    pub fn new() -> Self {
        Self {
            findings: Vec::new(),
        }
    }

    /// The cached canonical `NULL` node singleton (spec §3.3 "Singletons",
    /// §9 "Global sentinels").
    pub fn singleton_node() -> &'static Primitive {
        CANONICAL.get_or_init(|| Primitive::new(Tag::NULL, Vec::new()).expect("NULL tag is always primitive"))
    }

    /// Encode this value as its canonical node.
    pub fn to_node(&self) -> Primitive {
        Self::singleton_node().clone()
    }
}

impl Default for Null {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecificPrimitive for Null {
    const TAG_NUMBER: u64 = 5;
    const NAME: &'static str = "NULL";

    fn from_node(node: &Primitive) -> crate::error::Result<Self> {
        let mut findings = Vec::new();
        if !node.value().is_empty() {
            findings.push("length of value-field unequal to 0".to_string());
        }
        Ok(Self { findings })
    }

    fn findings(&self) -> &[String] {
        &self.findings
    }

    fn comment(&self) -> String {
        "NULL".to_string()
    }
}
