//! End-to-end scenarios exercising the public API the way a caller would:
//! decode a byte stream, inspect the tree, re-encode it.

use ber_tlv::decode::decode_node;
use ber_tlv::reader::SliceReader;
use ber_tlv::specific::{Boolean, OctetString, SpecificPrimitive};

fn decode(bytes: &[u8]) -> ber_tlv::BerTlv {
    let mut r = SliceReader::new(bytes);
    decode_node(&mut r).unwrap()
}

#[test]
fn primitive_round_trips_identically() {
    let bytes = hex_literal::hex!("81 02 AA BB");
    let node = decode(&bytes);
    let p = node.as_primitive().unwrap();
    assert_eq!(p.value(), &[0xAA, 0xBB]);
    assert_eq!(node.to_vec().unwrap(), bytes.to_vec());
}

#[test]
fn nested_definite_constructed() {
    let bytes = hex_literal::hex!("A1 07 87 01 99 81 02 12 34");
    let node = decode(&bytes);
    let c = node.as_constructed().unwrap();
    assert_eq!(c.children().len(), 2);
    assert_eq!(c.length_of_value_field(), 7);
}

#[test]
fn nested_indefinite_canonicalizes_to_definite() {
    let bytes = hex_literal::hex!(
        "F1 80  81 03 05 06 07  F2 80 C2 01 05 C3 01 50 00 00  44 02 05 06 00 00"
    );
    let node = decode(&bytes);
    let c = node.as_constructed().unwrap();
    assert_eq!(c.children().len(), 3);
    assert_eq!(c.length_of_value_field(), 17);

    let canonical = hex_literal::hex!("F1 11 81 03 05 06 07 F2 06 C2 01 05 C3 01 50 44 02 05 06");
    assert_eq!(node.to_vec().unwrap(), canonical.to_vec());
}

#[test]
fn boolean_non_minimal_length_finding_but_canonical_reencode() {
    let bytes = hex_literal::hex!("01 02 FF 00");
    let node = decode(&bytes);
    let p = node.as_primitive().unwrap();
    let b = Boolean::from_node(p).unwrap();
    assert!(b.value());
    assert!(!b.is_valid());
    assert_eq!(b.to_node().to_vec().unwrap(), vec![0x01, 0x01, 0xFF]);
}

#[test]
fn octet_string_non_minimal_length_finding() {
    let bytes = hex_literal::hex!("04 81 03 11 22 33");
    let node = decode(&bytes);
    let p = node.as_primitive().unwrap();
    let os = OctetString::from_node(p).unwrap();
    assert_eq!(os.value(), &[0x11, 0x22, 0x33]);
    assert!(!os.is_valid());
    assert_eq!(os.to_node().to_vec().unwrap(), vec![0x04, 0x03, 0x11, 0x22, 0x33]);
}

#[test]
fn overflow_rejected_without_building_a_node() {
    let bytes = hex_literal::hex!("E1 88 80 00 00 00 00 00 00 00");
    let mut r = SliceReader::new(&bytes);
    assert!(decode_node(&mut r).is_err());
}

#[test]
fn accessors_find_typed_children_by_tag_and_by_position() {
    use ber_tlv::{BerTlv, Constructed, Primitive, Tag};

    let seq = Constructed::from(
        Tag::SEQUENCE,
        vec![
            BerTlv::Primitive(Primitive::new(Tag::INTEGER, vec![0x01]).unwrap()),
            BerTlv::Primitive(Primitive::new(Tag::BOOLEAN, vec![0xFF]).unwrap()),
        ],
    )
    .unwrap();

    assert_eq!(seq.get_integer().unwrap().to_i64(), Some(1));
    assert!(seq.get_boolean_at(1).unwrap().value());
    assert!(seq.get_oid().is_err());
}

#[test]
fn tree_formatter_surfaces_findings() {
    use ber_tlv::format::TreeStyle;

    let bytes = hex_literal::hex!("01 02 FF 00");
    let node = decode(&bytes);
    let rendered = node.format_tree(&TreeStyle::default());
    assert!(rendered.contains("BOOLEAN := true"));
    assert!(rendered.contains("length of value-field unequal to 1"));
}
