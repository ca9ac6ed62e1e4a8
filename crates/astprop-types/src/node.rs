//! Document node model.
//!
//! A document is a generic JSON-like tree. The engine only ever reads it,
//! classifying each node as an object, an array or a scalar.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A tree-shaped document under test, e.g. a serialized AST.
pub type Document = Value;

/// Shape of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Named, unordered members.
    Object,
    /// Ordered elements.
    Array,
    /// String, number, boolean or null.
    Scalar,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object => write!(f, "object"),
            Self::Array => write!(f, "array"),
            Self::Scalar => write!(f, "scalar"),
        }
    }
}

/// Classify a node.
pub fn node_kind(node: &Value) -> NodeKind {
    match node {
        Value::Object(_) => NodeKind::Object,
        Value::Array(_) => NodeKind::Array,
        _ => NodeKind::Scalar,
    }
}

/// Textual representation of a scalar node.
///
/// Strings are returned verbatim, numbers and booleans in their JSON
/// spelling, and `null` as the empty string. Composite nodes have no flat
/// text and yield `None`.
pub fn scalar_text(node: &Value) -> Option<String> {
    match node {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Object(_) | Value::Array(_) => None,
    }
}

/// Where the text of an annotation container comes from.
///
/// Some producers store documentation as a bare string, others as an
/// object with a dedicated text member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationSource {
    PlainText(String),
    StructuredText { text: String },
}

impl AnnotationSource {
    /// Read the annotation container `node`, taking the text from
    /// `text_field` when the container is an object.
    pub fn from_node(node: &Value, text_field: &str) -> Self {
        match node {
            Value::Object(members) => Self::StructuredText {
                text: members
                    .get(text_field)
                    .and_then(scalar_text)
                    .unwrap_or_default(),
            },
            other => Self::PlainText(scalar_text(other).unwrap_or_default()),
        }
    }

    /// The annotation text, regardless of how it was stored.
    pub fn into_text(self) -> String {
        match self {
            Self::PlainText(text) | Self::StructuredText { text } => text,
        }
    }
}
