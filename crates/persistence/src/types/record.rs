//! Metadata record types.
//!
//! This module defines the [`MetadataRecord`] type, a discovery metadata
//! document whose `links` array is split into collection documents on save,
//! and the helpers that build the two views of every collection link: the
//! document stored in the collection index and the link re-embedded in the
//! record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// The `rel` value that marks a link as a collection reference.
pub const COLLECTION_REL: &str = "collection";

/// Field carried by stored collection documents pointing back to the record.
pub const BACK_REFERENCE_FIELD: &str = "original_metadata_id";

/// A discovery metadata record.
///
/// The record is an opaque JSON object apart from its `links` array. Every
/// link must be an object with a string `rel`; this is checked on
/// construction so a malformed record is rejected before anything is written.
///
/// # Examples
///
/// ```
/// use gdc_persistence::types::MetadataRecord;
/// use serde_json::json;
///
/// let record = MetadataRecord::from_value(json!({
///     "id": "urn:wmo:md:example",
///     "links": [
///         {"rel": "collection", "href": "https://example.org/c1"},
///         {"rel": "self", "href": "https://example.org/self"}
///     ]
/// }))
/// .unwrap();
///
/// assert_eq!(record.links().len(), 2);
/// assert_eq!(record.collection_links().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct MetadataRecord {
    fields: Map<String, Value>,
}

impl MetadataRecord {
    /// Creates a record from a JSON value, validating its links.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(ValidationError::NotAnObject {
                    found: json_type_name(&other).to_string(),
                });
            }
        };

        let links = fields
            .get("links")
            .and_then(Value::as_array)
            .ok_or(ValidationError::MissingLinks)?;

        for (position, link) in links.iter().enumerate() {
            let link = link.as_object().ok_or_else(|| ValidationError::InvalidLink {
                position,
                message: format!("expected an object, found {}", json_type_name(link)),
            })?;
            if !link.get("rel").is_some_and(Value::is_string) {
                return Err(ValidationError::InvalidLink {
                    position,
                    message: "missing string 'rel'".to_string(),
                });
            }
        }

        Ok(Self { fields })
    }

    /// Returns the record's `id` field, if it is a string.
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    /// Returns the record's links in their original order.
    pub fn links(&self) -> &[Value] {
        self.fields
            .get("links")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the links whose `rel` is `collection`, in order.
    pub fn collection_links(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.links()
            .iter()
            .filter_map(Value::as_object)
            .filter(|link| is_collection_link(link))
    }

    /// Returns a field of the record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns a copy of this record with its `links` replaced.
    pub(crate) fn with_links(&self, links: Vec<Value>) -> Self {
        let mut fields = self.fields.clone();
        fields.insert("links".to_string(), Value::Array(links));
        Self { fields }
    }

    /// Returns the record as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Consumes the record, returning its JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl TryFrom<Value> for MetadataRecord {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<MetadataRecord> for Value {
    fn from(record: MetadataRecord) -> Self {
        record.into_value()
    }
}

/// Returns true if the link's `rel` is `collection`.
pub fn is_collection_link(link: &Map<String, Value>) -> bool {
    link.get("rel").and_then(Value::as_str) == Some(COLLECTION_REL)
}

/// Builds the document stored in the collection index for a link.
///
/// The document is a copy of the link carrying the back-reference to the
/// primary document it was extracted from.
pub fn collection_document(link: &Map<String, Value>, metadata_id: &str) -> Value {
    let mut document = link.clone();
    document.insert(
        BACK_REFERENCE_FIELD.to_string(),
        Value::String(metadata_id.to_string()),
    );
    Value::Object(document)
}

/// Builds the link re-embedded in the record once its collection document
/// has been stored under `collection_id`.
pub fn rewritten_link(link: &Map<String, Value>, base_url: &str, collection_id: &str) -> Value {
    let mut rewritten = link.clone();
    rewritten.remove(BACK_REFERENCE_FIELD);
    rewritten.insert(
        "href".to_string(),
        Value::String(collection_href(base_url, collection_id)),
    );
    Value::Object(rewritten)
}

/// Joins a hosting base URL and a collection document id.
pub fn collection_href(base_url: &str, collection_id: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), collection_id)
}

/// What happens to links whose `rel` is not `collection` on save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkRetention {
    /// The saved record keeps only the rewritten collection links.
    #[default]
    CollectionsOnly,
    /// Other links are kept unchanged in their original positions.
    PreserveOthers,
}

/// The result of saving a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveOutcome {
    /// Identifier assigned to the record in the primary index.
    pub id: String,
    /// Identifiers assigned in the collection index, in link order.
    pub collection_ids: Vec<String>,
    /// The record as last written to the primary index.
    pub record: MetadataRecord,
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
