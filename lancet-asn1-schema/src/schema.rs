use crate::captures::Captures;
use crate::validate::validate;
use crate::SchemaValidationError;
use lancet_asn1::{Tag, TagClass};
use lancet_asn1_der::Node;

/// The expected shape of one tree element.
///
/// Every constraint is opt-in: a field left unset matches anything, so a
/// schema only needs to pin down what the caller actually relies on. Built
/// with the consuming setters below, typically starting from one of the
/// shorthand constructors:
///
/// ```
/// use lancet_asn1_schema::Schema;
///
/// let algorithm_identifier = Schema::sequence("algorithmIdentifier").value(vec![
///     Schema::oid("algorithm").capture("sigAlgOid"),
///     Schema::new("parameters").optional(),
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) name: String,
    pub(crate) tag_class: Option<TagClass>,
    pub(crate) tag: Option<Tag>,
    pub(crate) constructed: Option<bool>,
    pub(crate) optional: bool,
    pub(crate) composed: bool,
    pub(crate) capture: Option<String>,
    pub(crate) capture_asn1: Option<String>,
    pub(crate) capture_bit_string_contents: Option<String>,
    pub(crate) capture_bit_string_value: Option<String>,
    pub(crate) children: Vec<Schema>,
}

impl Schema {
    /// An unconstrained element that matches any node.
    pub fn new(name: impl Into<String>) -> Self {
        Schema {
            name: name.into(),
            tag_class: None,
            tag: None,
            constructed: None,
            optional: false,
            composed: false,
            capture: None,
            capture_asn1: None,
            capture_bit_string_contents: None,
            capture_bit_string_value: None,
            children: Vec::new(),
        }
    }

    fn universal(name: impl Into<String>, tag: Tag, constructed: bool) -> Self {
        Schema::new(name)
            .tag_class(TagClass::Universal)
            .tag(tag)
            .constructed(constructed)
    }

    pub fn sequence(name: impl Into<String>) -> Self {
        Schema::universal(name, Tag::SEQUENCE, true)
    }

    pub fn set(name: impl Into<String>) -> Self {
        Schema::universal(name, Tag::SET, true)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Schema::universal(name, Tag::INTEGER, false)
    }

    pub fn oid(name: impl Into<String>) -> Self {
        Schema::universal(name, Tag::OID, false)
    }

    pub fn bit_string(name: impl Into<String>) -> Self {
        Schema::new(name).tag_class(TagClass::Universal).tag(Tag::BIT_STRING)
    }

    pub fn octet_string(name: impl Into<String>) -> Self {
        Schema::universal(name, Tag::OCTET_STRING, false)
    }

    pub fn null(name: impl Into<String>) -> Self {
        Schema::universal(name, Tag::NULL, false)
    }

    /// An explicit CONTEXT-SPECIFIC wrapper like `[0]`.
    pub fn context(name: impl Into<String>, number: u8) -> Self {
        Schema::new(name)
            .tag_class(TagClass::ContextSpecific)
            .tag(Tag::new(number))
            .constructed(true)
    }

    pub fn tag_class(mut self, tag_class: TagClass) -> Self {
        self.tag_class = Some(tag_class);
        self
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn constructed(mut self, constructed: bool) -> Self {
        self.constructed = Some(constructed);
        self
    }

    /// Marks this element skippable: a mismatch moves on to the next sibling
    /// schema instead of failing the parent.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Declares that a primitive BIT STRING here encapsulates a nested
    /// encoding, which is decoded on the fly so child schemas can match it.
    /// Needed when the tree was decoded with the BIT STRING heuristic off.
    pub fn composed(mut self) -> Self {
        self.composed = true;
        self
    }

    /// Captures the matched node's content: its bytes for a primitive node,
    /// the node itself for a constructed one.
    pub fn capture(mut self, name: impl Into<String>) -> Self {
        self.capture = Some(name.into());
        self
    }

    /// Captures the whole matched node.
    pub fn capture_asn1(mut self, name: impl Into<String>) -> Self {
        self.capture_asn1 = Some(name.into());
        self
    }

    /// Captures a BIT STRING's raw content octets, unused-bits octet
    /// included.
    pub fn capture_bit_string_contents(mut self, name: impl Into<String>) -> Self {
        self.capture_bit_string_contents = Some(name.into());
        self
    }

    /// Captures a BIT STRING's bit payload with the unused-bits octet
    /// stripped. Only byte-aligned strings (zero unused bits) can be captured
    /// this way; anything else fails validation.
    pub fn capture_bit_string_value(mut self, name: impl Into<String>) -> Self {
        self.capture_bit_string_value = Some(name.into());
        self
    }

    /// Sets the expected children, in order.
    pub fn value(mut self, children: Vec<Schema>) -> Self {
        self.children = children;
        self
    }

    /// Matches `node` against this schema, returning the captured values or
    /// every accumulated failure.
    pub fn validate(&self, node: &Node) -> Result<Captures, SchemaValidationError> {
        let mut captures = Captures::new();
        let mut errors = Vec::new();
        if validate(node, self, &mut captures, &mut errors) {
            Ok(captures)
        } else {
            Err(SchemaValidationError { errors })
        }
    }
}
