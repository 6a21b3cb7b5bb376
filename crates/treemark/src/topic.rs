//! Topic records as delivered by the topic API.

use serde::Deserialize;
use serde_json::Value;
use treemark_core::TreePayload;

/// File name used when a record has neither an id nor a title
pub const FALLBACK_STEM: &str = "topic";

/// One topic record.
///
/// Fields use the API's names and keep their raw JSON values, so a record
/// with an unexpected field type still renders. Null, empty strings, `0`
/// and `false` are treated as absent throughout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicRecord {
    /// Identifier, usually a number or a string
    #[serde(default)]
    pub id: Option<Value>,

    /// Page title rendered as the document heading
    #[serde(default)]
    pub topic: Option<Value>,

    /// Label shown in the sidebar
    #[serde(default)]
    pub title: Option<Value>,

    /// Document tree, either JSON text or an already decoded array
    #[serde(default, rename = "docTree")]
    pub doc_tree: Option<Value>,
}

/// Text of a scalar field, or `None` when it is absent or falsy.
///
/// Arrays and objects carry no usable text and read as absent.
fn field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

impl TopicRecord {
    /// Build a record from any JSON value. Non-objects give an empty record.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "topic record is not an object, using empty record");
            Self::default()
        })
    }

    /// The document heading, if the record declares one
    pub fn page_title(&self) -> Option<String> {
        field_text(self.topic.as_ref())
    }

    /// The sidebar label, if the record declares one
    pub fn label(&self) -> Option<String> {
        field_text(self.title.as_ref())
    }

    /// The identifier as text, if it is present and not falsy
    pub fn id_text(&self) -> Option<String> {
        field_text(self.id.as_ref())
    }

    /// File name of the rendered page: `{id}.md`, else `{title}.md`, else
    /// `topic.md`
    pub fn file_name(&self) -> String {
        let stem = self
            .id_text()
            .or_else(|| self.label())
            .unwrap_or_else(|| FALLBACK_STEM.to_string());
        format!("{}.md", stem)
    }

    /// The tree payload, with JSON strings treated as encoded trees
    pub fn payload(&self) -> TreePayload {
        self.doc_tree.clone().map(TreePayload::from).unwrap_or_default()
    }
}
