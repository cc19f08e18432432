use crate::captures::{CapturedValue, Captures};
use crate::schema::Schema;
use crate::ValidationError;
use lancet_asn1::{Tag, TagClass};
use lancet_asn1_der::{from_der, Node, Value};

/// Matches `node` against `schema`, filling `captures` and `errors`.
///
/// Captures are recorded before children are visited, so an outer capture
/// always lands even when a child is what eventually fails. A failed optional
/// child leaves no trace in either output; its captures and errors are staged
/// in scratch buffers and merged only on success.
pub fn validate(
    node: &Node,
    schema: &Schema,
    captures: &mut Captures,
    errors: &mut Vec<ValidationError>,
) -> bool {
    if let Some(expected) = schema.tag_class {
        if expected != node.tag_class {
            errors.push(mismatch(
                schema,
                format!("tag class mismatch: expected {expected}, found {}", node.tag_class),
            ));
            return false;
        }
    }
    if let Some(expected) = schema.tag {
        if expected != node.tag {
            errors.push(mismatch(
                schema,
                format!("tag mismatch: expected {expected}, found {}", node.tag),
            ));
            return false;
        }
    }
    if let Some(expected) = schema.constructed {
        if expected != node.is_constructed() {
            errors.push(mismatch(
                schema,
                format!(
                    "expected {} encoding, found {}",
                    kind(expected),
                    kind(node.is_constructed())
                ),
            ));
            return false;
        }
    }

    if !record_captures(node, schema, captures, errors) {
        return false;
    }

    if schema.children.is_empty() {
        return true;
    }

    let composed_storage;
    let node_children: &[Node] = if schema.composed && !node.is_constructed() {
        match decode_composed(node) {
            Ok(inner) => {
                composed_storage = inner;
                std::slice::from_ref(&composed_storage)
            }
            Err(message) => {
                errors.push(mismatch(schema, message));
                return false;
            }
        }
    } else {
        node.children()
    };

    let mut index = 0;
    for child_schema in &schema.children {
        if index < node_children.len() {
            let mut scratch_captures = Captures::new();
            let mut scratch_errors = Vec::new();
            if validate(
                &node_children[index],
                child_schema,
                &mut scratch_captures,
                &mut scratch_errors,
            ) {
                captures.extend(scratch_captures);
                index += 1;
            } else if !child_schema.optional {
                errors.extend(scratch_errors);
                errors.push(mismatch(
                    schema,
                    format!("required element {:?} did not match", child_schema.name),
                ));
                return false;
            }
        } else if !child_schema.optional {
            errors.push(mismatch(
                schema,
                format!("missing required element {:?}", child_schema.name),
            ));
            return false;
        }
    }
    true
}

fn record_captures(
    node: &Node,
    schema: &Schema,
    captures: &mut Captures,
    errors: &mut Vec<ValidationError>,
) -> bool {
    if let Some(name) = &schema.capture {
        // a decoder-expanded BIT STRING still captures its raw content octets
        let value = match (&node.bit_string_contents, &node.value) {
            (Some(contents), _) => CapturedValue::Bytes(contents.clone()),
            (None, Value::Primitive(bytes)) => CapturedValue::Bytes(bytes.clone()),
            (None, Value::Constructed(_)) => CapturedValue::Node(node.clone()),
        };
        captures.insert(name.clone(), value);
    }
    if let Some(name) = &schema.capture_asn1 {
        captures.insert(name.clone(), CapturedValue::Node(node.clone()));
    }
    if schema.capture_bit_string_contents.is_some() || schema.capture_bit_string_value.is_some() {
        let contents = match bit_string_contents(node) {
            Some(contents) => contents,
            None => {
                let message = if node.tag_class == TagClass::Universal
                    && node.tag == Tag::BIT_STRING
                {
                    "BIT STRING has no raw content octets to capture"
                } else {
                    "not a BIT STRING"
                };
                errors.push(mismatch(schema, message.into()));
                return false;
            }
        };
        if let Some(name) = &schema.capture_bit_string_contents {
            captures.insert(name.clone(), CapturedValue::Bytes(contents.to_vec()));
        }
        if let Some(name) = &schema.capture_bit_string_value {
            let value = match contents {
                [] | [_] => Vec::new(),
                [0x00, payload @ ..] => payload.to_vec(),
                [unused, ..] => {
                    errors.push(mismatch(
                        schema,
                        format!("cannot capture bit payload with {unused} unused bits"),
                    ));
                    return false;
                }
            };
            captures.insert(name.clone(), CapturedValue::Bytes(value));
        }
    }
    true
}

/// The raw content octets of a BIT STRING node, unused-bits octet first.
fn bit_string_contents(node: &Node) -> Option<&[u8]> {
    node.bit_string_contents.as_deref().or_else(|| node.bytes())
}

/// Decodes the nested value out of a primitive BIT STRING for a `composed`
/// schema element.
fn decode_composed(node: &Node) -> Result<Node, String> {
    let contents = bit_string_contents(node).ok_or("composed element is not a BIT STRING")?;
    match contents {
        [] | [_] => Err("composed BIT STRING has no payload".into()),
        [0x00, payload @ ..] => {
            from_der(payload).map_err(|e| format!("composed BIT STRING payload: {e}"))
        }
        [unused, ..] => Err(format!(
            "composed BIT STRING has {unused} unused bits"
        )),
    }
}

fn mismatch(schema: &Schema, message: String) -> ValidationError {
    ValidationError {
        element: schema.name.clone(),
        message,
    }
}

fn kind(constructed: bool) -> &'static str {
    if constructed {
        "constructed"
    } else {
        "primitive"
    }
}
