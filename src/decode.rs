//! The generic decoder: reads one [`BerTlv`] node from a [`Reader`].

use crate::error::{Error, ErrorKind, EncodingReason, Result};
use crate::header::Header;
use crate::length::Length;
use crate::node::{BerTlv, Constructed, Primitive, ReadMetadata};
use crate::reader::Reader;
use crate::specific;
use crate::tag::Form;

/// Read one complete TLV from `reader`, dispatching to the specific-types
/// registry for recognized UNIVERSAL tags so the returned node carries an
/// [`crate::node::Annotation`] (comment + findings).
///
/// See spec §4.3 for the exact algorithm.
pub fn decode_node<'r, R: Reader<'r>>(reader: &mut R) -> Result<BerTlv> {
    let start = reader.position();
    let (header, length_field_len) = Header::decode(reader)?;

    match header.tag.form() {
        Form::Primitive => decode_primitive(reader, header, length_field_len, start),
        Form::Constructed => decode_constructed(reader, header, length_field_len, start),
    }
}

fn decode_primitive<'r, R: Reader<'r>>(
    reader: &mut R,
    header: Header,
    length_field_len: usize,
    start: usize,
) -> Result<BerTlv> {
    if header.length.is_indefinite() {
        return Err(Error::at(
            ErrorKind::MalformedEncoding(EncodingReason::IndefiniteLengthOnPrimitive),
            start,
        ));
    }

    let len = usize::try_from(header.length)?;
    let value = reader.read_vec(len)?;

    let meta = ReadMetadata {
        indefinite_form: false,
        length_of_length_field_from_stream: length_field_len,
        length_of_value_field_from_stream: len,
    };

    let mut node = Primitive::new(header.tag, value)?.with_read_metadata(meta);
    if let Some(annotation) = specific::annotate_primitive(&node) {
        node = node.with_annotation(annotation);
    }
    Ok(BerTlv::Primitive(node))
}

fn decode_constructed<'r, R: Reader<'r>>(
    reader: &mut R,
    header: Header,
    length_field_len: usize,
    start: usize,
) -> Result<BerTlv> {
    let mut children = Vec::new();

    let value_len_from_stream = if header.length.is_indefinite() {
        let before = reader.position();
        loop {
            if reader.remaining_len() == Some(0) {
                return Err(Error::at(ErrorKind::BufferUnderflow, reader.position()));
            }
            if reader.peek_byte()? == Some(0x00) {
                let eoc_pos = reader.position();
                let mut buf = [0u8; 2];
                reader.read_into(&mut buf)?;
                if buf != [0x00, 0x00] {
                    return Err(Error::at(
                        ErrorKind::MalformedEncoding(EncodingReason::MalformedEndOfContentMarker),
                        eoc_pos,
                    ));
                }
                break;
            }
            children.push(decode_node(reader)?);
        }
        reader.position() - before
    } else {
        let declared_len = usize::try_from(header.length)?;
        let before = reader.position();
        while reader.position() - before < declared_len {
            children.push(decode_node(reader)?);
        }
        let consumed = reader.position() - before;
        if consumed != declared_len {
            return Err(Error::at(
                ErrorKind::MalformedEncoding(EncodingReason::DefiniteLengthMismatch),
                start,
            ));
        }
        consumed
    };

    let meta = ReadMetadata {
        indefinite_form: header.length.is_indefinite(),
        length_of_length_field_from_stream: length_field_len,
        length_of_value_field_from_stream: value_len_from_stream,
    };

    let mut node = Constructed::from(header.tag, children)?.with_read_metadata(meta);
    if let Some(annotation) = specific::annotate_constructed(&node) {
        node = node.with_annotation(annotation);
    }
    Ok(BerTlv::Constructed(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::SliceReader;
    use crate::writer::VecWriter;

    #[test]
    fn scenario_primitive() {
        let bytes = hex_literal::hex!("81 02 AA BB");
        let mut r = SliceReader::new(&bytes);
        let node = decode_node(&mut r).unwrap();
        let p = node.as_primitive().unwrap();
        assert_eq!(p.value(), &[0xAA, 0xBB]);
        let mut w = VecWriter::new();
        node.encode(&mut w).unwrap();
        assert_eq!(w.into_vec(), bytes);
    }

    #[test]
    fn scenario_nested_definite() {
        let bytes = hex_literal::hex!("A1 07 87 01 99 81 02 12 34");
        let mut r = SliceReader::new(&bytes);
        let node = decode_node(&mut r).unwrap();
        let c = node.as_constructed().unwrap();
        assert_eq!(c.children().len(), 2);
        assert_eq!(c.length_of_value_field(), 7);
    }

    #[test]
    fn scenario_nested_indefinite() {
        let bytes = hex_literal::hex!(
            "F1 80  81 03 05 06 07  F2 80 C2 01 05 C3 01 50 00 00  44 02 05 06 00 00"
        );
        let mut r = SliceReader::new(&bytes);
        let node = decode_node(&mut r).unwrap();
        let c = node.as_constructed().unwrap();
        assert_eq!(c.children().len(), 3);
        assert_eq!(c.length_of_value_field(), 17);
        let inner = c.children()[1].as_constructed().unwrap();
        assert_eq!(inner.children().len(), 2);

        let canonical = hex_literal::hex!(
            "F1 11 81 03 05 06 07 F2 06 C2 01 05 C3 01 50 44 02 05 06"
        );
        assert_eq!(node.to_vec().unwrap(), canonical);
    }

    #[test]
    fn empty_indefinite_decodes_to_empty_constructed() {
        let bytes = hex_literal::hex!("30 80 00 00");
        let mut r = SliceReader::new(&bytes);
        let node = decode_node(&mut r).unwrap();
        let c = node.as_constructed().unwrap();
        assert_eq!(c.children().len(), 0);
    }

    #[test]
    fn primitive_with_indefinite_length_rejected() {
        let bytes = hex_literal::hex!("04 80");
        let mut r = SliceReader::new(&bytes);
        assert!(matches!(
            decode_node(&mut r).unwrap_err().kind(),
            ErrorKind::MalformedEncoding(EncodingReason::IndefiniteLengthOnPrimitive)
        ));
    }

    #[test]
    fn overflow_rejects_before_building_node() {
        let bytes = hex_literal::hex!("E1 88 80 00 00 00 00 00 00 00");
        let mut r = SliceReader::new(&bytes);
        assert!(matches!(
            decode_node(&mut r).unwrap_err().kind(),
            ErrorKind::LengthOverflow
        ));
    }
}
