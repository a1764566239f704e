//! Pure Rust implementation of the ITU-T X.690 Basic Encoding Rules (BER)
//! for Tag-Length-Value data.
//!
//! This crate decodes and encodes BER-TLV trees: an immutable [`BerTlv`]
//! node is either [`Primitive`](node::Primitive) (a tag plus a contiguous
//! value) or [`Constructed`](node::Constructed) (a tag plus an ordered list
//! of child nodes). A registry of UNIVERSAL-class [`specific`] types
//! (BOOLEAN, INTEGER, OBJECT IDENTIFIER, SEQUENCE, ...) layers decoded
//! semantic values and tolerated-deviation findings on top of the generic
//! tree, without ever hard-failing decode on a recoverable BER quirk.
//!
//! ```
//! use ber_tlv::decode::decode_node;
//! use ber_tlv::reader::SliceReader;
//!
//! let bytes = [0x01, 0x01, 0xFF];
//! let mut reader = SliceReader::new(&bytes);
//! let node = decode_node(&mut reader).unwrap();
//! assert!(node.is_primitive());
//! assert_eq!(node.to_vec().unwrap(), bytes);
//! ```

#![warn(missing_docs)]

pub mod accessors;
pub mod decode;
pub mod error;
pub mod format;
pub mod header;
pub mod length;
pub mod node;
pub mod reader;
pub mod specific;
pub mod tag;
pub mod writer;

mod codec;

pub use error::{Error, ErrorKind, Result};
pub use header::Header;
pub use length::Length;
pub use node::{Annotation, BerTlv, Constructed, Primitive, ReadMetadata};
pub use tag::{Class, Form, Tag};

pub use codec::{base64_decode, base64_encode, hex_decode, hex_encode};
