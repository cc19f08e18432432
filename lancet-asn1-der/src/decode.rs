use crate::cursor::ByteCursor;
use crate::node::Node;
use crate::{Asn1DerError, Result};
use lancet_asn1::{Tag, TagClass};

/// Knobs of the TLV decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Strict mode fails on truncated declared lengths; lenient mode clamps
    /// them to the available bytes (used to recover partial BIT STRING
    /// payloads from cut-off material).
    pub strict: bool,
    /// Attempt to re-parse BIT STRING payloads as encapsulated ASN.1.
    pub decode_bit_strings: bool,
    /// Require the whole input to be consumed by the top-level value.
    pub parse_all_bytes: bool,
    /// Recursion guard against adversarial nesting.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict: true,
            decode_bit_strings: true,
            parse_all_bytes: true,
            max_depth: 64,
        }
    }
}

/// Decodes one BER/DER value with default (strict) options.
pub fn from_der(bytes: &[u8]) -> Result<Node> {
    from_der_with_options(bytes, &DecodeOptions::default())
}

/// Decodes one BER/DER value.
pub fn from_der_with_options(bytes: &[u8], options: &DecodeOptions) -> Result<Node> {
    debug_log!("from_der: {} bytes", bytes.len());
    let mut cursor = ByteCursor::new(bytes);
    let node = decode_node(&mut cursor, options, 0)?;
    if options.parse_all_bytes && !cursor.is_empty() {
        return Err(Asn1DerError::TrailingData {
            remaining: cursor.remaining(),
        });
    }
    Ok(node)
}

fn decode_node(cursor: &mut ByteCursor<'_>, options: &DecodeOptions, depth: usize) -> Result<Node> {
    if depth > options.max_depth {
        return Err(Asn1DerError::MaxDepthExceeded {
            max: options.max_depth,
        });
    }

    let identifier = cursor.read_one()?;
    let number = identifier & 0x1F;
    if number == 0x1F {
        // multi-octet tag form, outside the supported tag range
        return Err(Asn1DerError::InvalidTag { octet: identifier });
    }
    let tag_class = TagClass::from_identifier(identifier);
    let tag = Tag::new(number);
    let constructed = identifier & 0x20 != 0;

    let mut length = read_length(cursor)?;
    debug_log!("decode: {} {} len {:?}", tag_class, tag, length);
    if let Some(declared) = length {
        if declared > cursor.remaining() {
            if options.strict {
                return Err(Asn1DerError::TruncatedInput {
                    needed: declared,
                    available: cursor.remaining(),
                });
            }
            length = Some(cursor.remaining());
        }
    }

    if constructed {
        let children = match length {
            Some(len) => {
                let mut content = ByteCursor::new(cursor.read_slice(len)?);
                let mut children = Vec::new();
                while !content.is_empty() {
                    children.push(decode_node(&mut content, options, depth + 1)?);
                }
                children
            }
            None => decode_indefinite_children(cursor, options, depth)?,
        };
        return Ok(Node::constructed(tag_class, tag, children));
    }

    let len = match length {
        Some(len) => len,
        None if options.strict => {
            return Err(Asn1DerError::InvalidLength {
                context: "indefinite length on a primitive value",
            })
        }
        None => cursor.remaining(),
    };
    let contents = cursor.read_slice(len)?;

    let is_bit_string = tag_class == TagClass::Universal && tag == Tag::BIT_STRING;
    let encapsulated = if is_bit_string && options.decode_bit_strings {
        try_decode_encapsulated(contents, options, depth)
    } else {
        None
    };
    let mut node = match encapsulated {
        Some(inner) => Node::constructed(tag_class, tag, vec![inner]),
        None => Node::primitive(tag_class, tag, contents),
    };
    if is_bit_string {
        node.bit_string_contents = Some(contents.to_vec());
        node.snapshot();
    }
    Ok(node)
}

/// Collects children of an indefinite-length value up to (and past) the
/// end-of-contents marker at this nesting depth.
fn decode_indefinite_children(
    cursor: &mut ByteCursor<'_>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<Vec<Node>> {
    let mut children = Vec::new();
    loop {
        if cursor.remaining() < 2 {
            return Err(Asn1DerError::UnterminatedIndefiniteLength);
        }
        if cursor.remaining_bytes()[..2] == [0x00, 0x00] {
            cursor.skip(2)?;
            return Ok(children);
        }
        // every child consumes at least its identifier and length octets,
        // so this loop always makes forward progress
        children.push(decode_node(cursor, options, depth + 1)?);
    }
}

/// Speculative re-parse of BIT STRING content as a nested value.
///
/// BIT STRINGs routinely encapsulate a SEQUENCE (subjectPublicKey, wrapped
/// signatures), but arbitrary payload bytes can coincidentally look like a
/// TLV. The re-parse is kept only when the payload is byte-aligned (zero
/// unused bits) and a strict decode consumes it exactly; anything else is
/// discarded and the BIT STRING stays raw.
fn try_decode_encapsulated(
    contents: &[u8],
    options: &DecodeOptions,
    depth: usize,
) -> Option<Node> {
    if contents.len() < 2 || contents[0] != 0x00 {
        return None;
    }
    let speculative = DecodeOptions {
        strict: true,
        ..*options
    };
    let mut sub = ByteCursor::new(&contents[1..]);
    match decode_node(&mut sub, &speculative, depth + 1) {
        Ok(inner) if sub.is_empty() => {
            debug_log!("bit string recognized as encapsulated {}", inner.tag);
            Some(inner)
        }
        _ => None,
    }
}

/// Reads short-form, long-form or indefinite (`None`) length octets.
fn read_length(cursor: &mut ByteCursor<'_>) -> Result<Option<usize>> {
    let first = cursor.read_one()?;
    if first & 0x80 == 0 {
        return Ok(Some(usize::from(first)));
    }
    let count = usize::from(first & 0x7F);
    if count == 0 {
        return Ok(None);
    }
    if count > std::mem::size_of::<usize>() {
        return Err(Asn1DerError::InvalidLength {
            context: "length octet count exceeds platform width",
        });
    }
    let mut length = 0usize;
    for &octet in cursor.read_slice(count)? {
        length = (length << 8) | usize::from(octet);
    }
    Ok(Some(length))
}
