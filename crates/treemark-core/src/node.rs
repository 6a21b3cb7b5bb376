//! Document tree model
//!
//! Nodes are built from JSON values tolerantly: wrong types read as absent
//! fields, and non-object values are not nodes at all.

use serde_json::Value;

/// Field holding the node's class tag
pub const CLASS_FIELD: &str = "DOMnodeClass";
/// Preferred text field
pub const FIRST_CHILD_TEXT_FIELD: &str = "DOMfirstChildInnerText";
/// Fallback text field
pub const INNER_TEXT_FIELD: &str = "DOMinnerText";
/// Field holding the ordered child array
pub const CHILDREN_FIELD: &str = "DOMchildArray";

/// One element of a document tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Class tag, e.g. `"level-3"`; empty when absent
    pub class: String,

    /// Inline text; empty when absent
    pub text: String,

    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node with a class tag and text
    pub fn new(class: &str, text: &str) -> Self {
        Self {
            class: class.to_string(),
            text: text.to_string(),
            children: Vec::new(),
        }
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Builder form of [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Check whether the node carries no class, no text and no children
    pub fn is_blank(&self) -> bool {
        self.class.is_empty() && self.text.is_empty() && self.children.is_empty()
    }

    /// Build a node from a JSON value.
    ///
    /// Returns `None` for anything that is not an object. Children that are
    /// not objects become blank nodes: they still count as children of their
    /// parent but render nothing themselves.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let class = object
            .get(CLASS_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let text = [FIRST_CHILD_TEXT_FIELD, INNER_TEXT_FIELD]
            .iter()
            .filter_map(|field| object.get(*field).and_then(Value::as_str))
            .find(|text| !text.is_empty())
            .unwrap_or_default()
            .to_string();

        let children = object
            .get(CHILDREN_FIELD)
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Node::from_value_or_blank).collect())
            .unwrap_or_default();

        Some(Self {
            class,
            text,
            children,
        })
    }

    /// Like [`Node::from_value`], with non-objects read as blank nodes
    pub fn from_value_or_blank(value: &Value) -> Self {
        Self::from_value(value).unwrap_or_default()
    }
}

/// The decoded top-level blocks of a topic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTree {
    pub nodes: Vec<Node>,
}

impl DocTree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build a tree from an already structured value. Anything but an array
    /// yields an empty tree.
    pub fn from_value(value: &Value) -> Self {
        match value.as_array() {
            Some(items) => Self::new(items.iter().map(Node::from_value_or_blank).collect()),
            None => {
                tracing::debug!("tree payload is not an array, skipping body");
                Self::default()
            }
        }
    }
}

/// A tree payload as it arrives with a topic
#[derive(Debug, Clone, PartialEq)]
pub enum TreePayload {
    /// JSON text that still has to be decoded
    Raw(String),
    /// An already decoded JSON value
    Structured(Value),
}

impl TreePayload {
    /// Decode the payload into a tree. Never fails: undecodable text is an
    /// empty tree.
    pub fn decode(&self) -> DocTree {
        match self {
            TreePayload::Raw(text) => match serde_json::from_str::<Value>(text) {
                Ok(value) => DocTree::from_value(&value),
                Err(err) => {
                    tracing::debug!(error = %err, "tree payload is not valid JSON, using empty tree");
                    DocTree::default()
                }
            },
            TreePayload::Structured(value) => DocTree::from_value(value),
        }
    }
}

impl From<Value> for TreePayload {
    /// JSON strings are raw, encoded payloads; everything else is structured.
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => TreePayload::Raw(text),
            other => TreePayload::Structured(other),
        }
    }
}

impl Default for TreePayload {
    fn default() -> Self {
        TreePayload::Structured(Value::Null)
    }
}
