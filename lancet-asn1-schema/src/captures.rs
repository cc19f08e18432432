use lancet_asn1_der::Node;
use std::collections::HashMap;

/// A value captured during validation.
///
/// Primitive content and BIT STRING captures store bytes; whole-node captures
/// store the node itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedValue {
    Bytes(Vec<u8>),
    Node(Node),
}

impl CapturedValue {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CapturedValue::Bytes(bytes) => Some(bytes),
            CapturedValue::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            CapturedValue::Node(node) => Some(node),
            CapturedValue::Bytes(_) => None,
        }
    }
}

/// Named values collected by a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    entries: HashMap<String, CapturedValue>,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: CapturedValue) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&CapturedValue> {
        self.entries.get(name)
    }

    /// Shortcut for byte captures.
    pub fn bytes(&self, name: &str) -> Option<&[u8]> {
        self.get(name)?.as_bytes()
    }

    /// Shortcut for node captures.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.get(name)?.as_node()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges another capture set in, later entries winning on name clashes.
    pub fn extend(&mut self, other: Captures) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CapturedValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}
