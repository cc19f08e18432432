use crate::node::{Node, Value};
use lancet_asn1::{Tag, TagClass};

/// Encodes a node tree as DER.
///
/// Always emits definite, minimal length octets, whatever BER form the tree
/// was decoded from. Total over all trees: a primitive node is its bytes, a
/// constructed node is its children, there is no unencodable state.
pub fn to_der(node: &Node) -> Vec<u8> {
    let mut out = Vec::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut Vec<u8>) {
    let is_bit_string = node.tag_class == TagClass::Universal && node.tag == Tag::BIT_STRING;

    // a decoded, untouched BIT STRING replays its original content octets
    if is_bit_string {
        if let Some(contents) = node.replayable_bit_string_contents() {
            write_header(node.tag_class.bits() | node.tag.number(), contents.len(), out);
            out.extend_from_slice(contents);
            return;
        }
    }

    match &node.value {
        Value::Primitive(bytes) => {
            write_header(node.tag_class.bits() | node.tag.number(), bytes.len(), out);
            out.extend_from_slice(bytes);
        }
        Value::Constructed(children) => {
            let mut content = Vec::new();
            for child in children {
                write_node(child, &mut content);
            }
            if is_bit_string {
                // encapsulated payload stays primitive on the wire, with a
                // zero unused-bits octet ahead of the nested encoding
                write_header(
                    node.tag_class.bits() | node.tag.number(),
                    content.len() + 1,
                    out,
                );
                out.push(0x00);
            } else {
                write_header(
                    node.tag_class.bits() | 0x20 | node.tag.number(),
                    content.len(),
                    out,
                );
            }
            out.extend_from_slice(&content);
        }
    }
}

/// Writes the identifier octet and minimal definite length octets.
fn write_header(identifier: u8, len: usize, out: &mut Vec<u8>) {
    out.push(identifier);
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let octets = len.to_be_bytes();
    let skip = octets.iter().take_while(|&&b| b == 0).count();
    out.push(0x80 | (octets.len() - skip) as u8);
    out.extend_from_slice(&octets[skip..]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_der;
    use pretty_assertions::assert_eq;

    #[test]
    fn encodes_nested_sequence() {
        let node = Node::sequence(vec![Node::integer(vec![0x2A]), Node::null()]);
        assert_eq!(to_der(&node), [0x30, 0x05, 0x02, 0x01, 0x2A, 0x05, 0x00]);
    }

    #[test]
    fn context_specific_constructed_identifier() {
        let node = Node::context(3, vec![Node::octet_string(vec![0xAB])]);
        assert_eq!(to_der(&node), [0xA3, 0x03, 0x04, 0x01, 0xAB]);
    }

    #[test]
    fn length_form_switches_at_128_content_bytes() {
        let node = Node::octet_string(vec![0x11; 127]);
        let der = to_der(&node);
        assert_eq!(&der[..2], &[0x04, 0x7F]);
        assert_eq!(der.len(), 129);

        let node = Node::octet_string(vec![0x11; 128]);
        let der = to_der(&node);
        assert_eq!(&der[..3], &[0x04, 0x81, 0x80]);
        assert_eq!(der.len(), 131);

        let node = Node::octet_string(vec![0x11; 300]);
        let der = to_der(&node);
        assert_eq!(&der[..4], &[0x04, 0x82, 0x01, 0x2C]);
    }

    #[test]
    fn long_form_input_re_encodes_minimal() {
        let node = from_der(&[0x02, 0x81, 0x01, 0x2A]).unwrap();
        assert_eq!(to_der(&node), [0x02, 0x01, 0x2A]);
    }

    #[test]
    fn hand_built_bit_string_encodes_its_bytes() {
        let node = Node::bit_string(vec![0x06, 0x6E, 0x5D, 0xC0]);
        assert_eq!(to_der(&node), [0x03, 0x04, 0x06, 0x6E, 0x5D, 0xC0]);
    }

    #[test]
    fn hand_built_constructed_bit_string_gets_unused_bits_prefix() {
        let node = Node::constructed(
            lancet_asn1::TagClass::Universal,
            lancet_asn1::Tag::BIT_STRING,
            vec![Node::sequence(vec![Node::integer(vec![0x07])])],
        );
        assert_eq!(
            to_der(&node),
            [0x03, 0x06, 0x00, 0x30, 0x03, 0x02, 0x01, 0x07]
        );
    }

    #[test]
    fn round_trips_are_stable_after_first_pass() {
        // BER input with indefinite and long-form lengths
        let ber = [
            0x30, 0x80, 0x02, 0x81, 0x01, 0x2A, 0x03, 0x03, 0x00, 0x05, 0x00, 0x00, 0x00,
        ];
        let first = to_der(&from_der(&ber).unwrap());
        let second = to_der(&from_der(&first).unwrap());
        assert_eq!(first, second);
    }
}
