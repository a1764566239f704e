//! `EndOfContent` (UNIVERSAL 0, primitive): the marker used to terminate
//! indefinite-length constructed encodings. Only ever consumed internally
//! by [`crate::decode::decode_node`]'s indefinite-length loop; exposed here
//! so a caller that decodes one standalone (outside of that loop) gets the
//! same validation.

use crate::node::Primitive;
use crate::specific::SpecificPrimitive;
use crate::tag::Tag;
use std::sync::OnceLock;

/// A decoded End-of-Content marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndOfContent {
    findings: Vec<String>,
}

static CANONICAL: OnceLock<Primitive> = OnceLock::new();

impl EndOfContent {
    /// The canonical marker (no findings).
    pub fn new() -> Self {
        Self {
            findings: Vec::new(),
        }
    }

    /// The cached canonical node singleton.
    pub fn singleton_node() -> &'static Primitive {
        CANONICAL.get_or_init(|| {
            Primitive::new(Tag::END_OF_CONTENT, Vec::new()).expect("tag 0 is always primitive")
        })
    }

    /// Encode this value as its canonical node.
    pub fn to_node(&self) -> Primitive {
        Self::singleton_node().clone()
    }
}

impl Default for EndOfContent {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecificPrimitive for EndOfContent {
    const TAG_NUMBER: u64 = 0;
    const NAME: &'static str = "EndOfContent";

    fn from_node(node: &Primitive) -> crate::error::Result<Self> {
        let mut findings = Vec::new();
        if !node.value().is_empty() {
            findings.push("value-field present".to_string());
        }
        if let Some(meta) = node.read_metadata() {
            if meta.length_of_length_field_from_stream != 1 {
                findings.push("non-'00' length-field".to_string());
            }
        }
        Ok(Self { findings })
    }

    fn findings(&self) -> &[String] {
        &self.findings
    }

    fn comment(&self) -> String {
        "EndOfContent".to_string()
    }
}
