//! Compact and tree formatting for [`BerTlv`] (spec §4.7).

use crate::node::BerTlv;
use core::fmt::Write as _;

/// Formatting options for [`BerTlv::format_tree`].
#[derive(Clone, Debug)]
pub struct TreeStyle {
    /// The string repeated once per nesting level of indentation.
    pub indent: String,
    /// Separator inserted between tag, length and value when printing a
    /// node's own header line.
    pub separator: String,
    /// Whether to append specific-type end-of-line comments (`# ...`).
    pub show_comments: bool,
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            separator: " ".to_string(),
            show_comments: true,
        }
    }
}

/// Formatting options for [`BerTlv::format_compact`].
#[derive(Clone, Debug)]
pub struct CompactStyle {
    /// Separator inserted between the tag, length and value hex groups.
    pub separator: String,
}

impl Default for CompactStyle {
    fn default() -> Self {
        Self {
            separator: String::new(),
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02X}");
    }
    s
}

impl BerTlv {
    /// Render this node's full encoded bytes as `TT LL VV` hexadecimal, with
    /// `style.separator` inserted between the header and each child (for
    /// constructed nodes, children's own encodings are written back-to-back).
    pub fn format_compact(&self, style: &CompactStyle) -> crate::error::Result<String> {
        let bytes = self.to_vec()?;
        Ok(hex(&bytes)
            .as_bytes()
            .chunks(2)
            .map(|c| core::str::from_utf8(c).unwrap())
            .collect::<Vec<_>>()
            .join(&style.separator))
    }

    /// Render this node (and its descendants) as an indented tree, one tag
    /// per line, with an optional specific-type comment.
    pub fn format_tree(&self, style: &TreeStyle) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, style, 0);
        out
    }

    fn write_tree(&self, out: &mut String, style: &TreeStyle, depth: usize) {
        for _ in 0..depth {
            out.push_str(&style.indent);
        }
        let _ = write!(out, "{}{}", self.tag(), style.separator);
        match self {
            BerTlv::Primitive(p) => {
                let _ = write!(out, "({} bytes): {}", p.value().len(), hex(p.value()));
            }
            BerTlv::Constructed(c) => {
                let _ = write!(out, "({} children)", c.children().len());
            }
        }
        if style.show_comments {
            if let Some(annotation) = self.annotation() {
                if let Some(comment) = &annotation.comment {
                    let _ = write!(out, "  # {comment}");
                }
                if !annotation.is_valid() {
                    let _ = write!(out, " [{}]", annotation.findings.join("; "));
                }
            }
        }
        out.push('\n');

        if let BerTlv::Constructed(c) = self {
            for child in c.children() {
                child.write_tree(out, style, depth + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Constructed, Primitive};
    use crate::specific::Boolean;
    use crate::tag::Tag;

    #[test]
    fn compact_roundtrips_hex() {
        let node = BerTlv::Primitive(Primitive::new(Tag::INTEGER, vec![0x01, 0x02]).unwrap());
        assert_eq!(node.format_compact(&CompactStyle::default()).unwrap(), "02020102");
    }

    #[test]
    fn tree_shows_comment_and_findings() {
        let b = Boolean::from_value(true).to_node();
        let node = BerTlv::Constructed(
            Constructed::from(Tag::SEQUENCE, vec![BerTlv::Primitive(b)]).unwrap(),
        );
        let decoded = crate::decode::decode_node(&mut crate::reader::SliceReader::new(&node.to_vec().unwrap())).unwrap();
        let tree = decoded.format_tree(&TreeStyle::default());
        assert!(tree.contains("BOOLEAN := true"));
    }
}
