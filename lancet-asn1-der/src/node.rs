use lancet_asn1::{Tag, TagClass};
use std::fmt;

/// Content of a [`Node`]: raw bytes for primitive encodings, ordered child
/// nodes for constructed ones. The split makes malformed trees (a primitive
/// node holding children) unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Primitive(Vec<u8>),
    Constructed(Vec<Node>),
}

/// A decoded ASN.1 tree element.
///
/// Child order is wire order. For UNIVERSAL BIT STRINGs the decoder keeps the
/// raw content octets (unused-bits octet included) in `bit_string_contents`
/// even when the payload was recognized as an encapsulated structure and
/// `value` holds the re-parsed tree; re-encoding an unmodified node replays
/// those octets verbatim.
#[derive(Debug, Clone)]
pub struct Node {
    pub tag_class: TagClass,
    pub tag: Tag,
    pub value: Value,
    pub bit_string_contents: Option<Vec<u8>>,
    /// Snapshot taken at decode time, used to detect mutation before replaying
    /// `bit_string_contents`.
    original: Option<Box<Node>>,
}

impl Node {
    pub fn primitive(tag_class: TagClass, tag: Tag, bytes: impl Into<Vec<u8>>) -> Node {
        Node {
            tag_class,
            tag,
            value: Value::Primitive(bytes.into()),
            bit_string_contents: None,
            original: None,
        }
    }

    pub fn constructed(tag_class: TagClass, tag: Tag, children: Vec<Node>) -> Node {
        Node {
            tag_class,
            tag,
            value: Value::Constructed(children),
            bit_string_contents: None,
            original: None,
        }
    }

    pub fn sequence(children: Vec<Node>) -> Node {
        Node::constructed(TagClass::Universal, Tag::SEQUENCE, children)
    }

    pub fn set(children: Vec<Node>) -> Node {
        Node::constructed(TagClass::Universal, Tag::SET, children)
    }

    /// An INTEGER from already-minimal content octets.
    pub fn integer(content: impl Into<Vec<u8>>) -> Node {
        Node::primitive(TagClass::Universal, Tag::INTEGER, content)
    }

    pub fn oid(content: impl Into<Vec<u8>>) -> Node {
        Node::primitive(TagClass::Universal, Tag::OID, content)
    }

    pub fn octet_string(content: impl Into<Vec<u8>>) -> Node {
        Node::primitive(TagClass::Universal, Tag::OCTET_STRING, content)
    }

    /// A BIT STRING from content octets that already carry the leading
    /// unused-bits count.
    pub fn bit_string(content: impl Into<Vec<u8>>) -> Node {
        Node::primitive(TagClass::Universal, Tag::BIT_STRING, content)
    }

    pub fn null() -> Node {
        Node::primitive(TagClass::Universal, Tag::NULL, Vec::new())
    }

    pub fn context(number: u8, children: Vec<Node>) -> Node {
        Node::constructed(TagClass::ContextSpecific, Tag::new(number), children)
    }

    pub fn is_constructed(&self) -> bool {
        matches!(self.value, Value::Constructed(_))
    }

    /// Child nodes; empty for primitive nodes.
    pub fn children(&self) -> &[Node] {
        match &self.value {
            Value::Constructed(children) => children,
            Value::Primitive(_) => &[],
        }
    }

    /// Content octets; `None` for constructed nodes.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Primitive(bytes) => Some(bytes),
            Value::Constructed(_) => None,
        }
    }

    /// Records the current state as the as-decoded snapshot.
    pub(crate) fn snapshot(&mut self) {
        self.original = Some(Box::new(self.clone()));
    }

    /// The raw BIT STRING content octets, if they may be replayed verbatim:
    /// present, and the node not mutated since its decode-time snapshot.
    pub(crate) fn replayable_bit_string_contents(&self) -> Option<&[u8]> {
        let contents = self.bit_string_contents.as_deref()?;
        match &self.original {
            Some(original) => (self == original.as_ref()).then_some(contents),
            None => Some(contents),
        }
    }
}

/// Structural equality: tag class, tag number, construction and decoded
/// content. The original length-encoding form and any retained raw BIT
/// STRING octets are not compared, so two BER encodings of the same value
/// decode to equal trees.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.tag_class == other.tag_class && self.tag == other.tag && self.value == other.value
    }
}

impl Eq for Node {}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_node(self, f, 0)
    }
}

fn fmt_node(node: &Node, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("  ")?;
    }
    match node.tag_class {
        TagClass::Universal => write!(f, "{}", node.tag)?,
        TagClass::ContextSpecific => write!(f, "[{}]", node.tag.number())?,
        class => write!(f, "{} [{}]", class, node.tag.number())?,
    }
    match &node.value {
        Value::Primitive(bytes) => {
            if bytes.is_empty() {
                writeln!(f)
            } else {
                writeln!(f, ": {}", hex::encode(bytes))
            }
        }
        Value::Constructed(children) => {
            writeln!(f)?;
            for child in children {
                fmt_node(child, f, depth + 1)?;
            }
            Ok(())
        }
    }
}
