//! Input document model: entities and relationship triplets.
//!
//! A document is decoded in two steps. The top level must be a JSON object;
//! its `entities` and `triplets` arrays are kept as raw values and each item
//! is decoded on its own, so one malformed item never sinks the whole load.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{GraphloadError, Result};
use crate::sanitize::{self, DEFAULT_LABEL};

// ── Document ──────────────────────────────────────────────────────

/// A parsed input file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub entities: Vec<Value>,
    #[serde(default)]
    pub triplets: Vec<Value>,
}

impl Document {
    /// Read and parse a document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GraphloadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(GraphloadError::InvalidDocument(format!(
                "top level must be an object, found {}",
                json_kind(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }
}

// ── Entity ────────────────────────────────────────────────────────

/// A node to create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default, rename = "label", deserialize_with = "deserialize_labels")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub original_text: Option<Value>,
    #[serde(default)]
    pub properties: Option<Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl Entity {
    /// Decode one raw item from the `entities` array.
    pub fn from_value(value: &Value) -> Result<Self> {
        Entity::deserialize(value).map_err(|e| GraphloadError::InvalidItem {
            kind: "entity",
            reason: e.to_string(),
        })
    }

    /// Display name, falling back to the id.
    ///
    /// Any JSON value is accepted and stored as given.
    pub fn display_name(&self) -> Value {
        self.name
            .clone()
            .unwrap_or_else(|| Value::String(self.id.clone()))
    }

    /// `description`, or an empty string.
    pub fn description(&self) -> Value {
        self.description.clone().unwrap_or_else(empty_string)
    }

    /// `original_text`, or an empty string.
    pub fn original_text(&self) -> Value {
        self.original_text.clone().unwrap_or_else(empty_string)
    }

    /// Sanitized labels; [`DEFAULT_LABEL`] when none survive sanitization.
    pub fn effective_labels(&self) -> Vec<String> {
        let labels: Vec<String> = self
            .labels
            .iter()
            .filter_map(|l| sanitize::label(l))
            .collect();
        if labels.is_empty() {
            vec![DEFAULT_LABEL.to_string()]
        } else {
            labels
        }
    }

    /// Dynamic properties, if `properties` is an object. Anything else is ignored.
    pub fn property_map(&self) -> Option<&Map<String, Value>> {
        self.properties.as_ref().and_then(Value::as_object)
    }

    /// Metadata serialized as a JSON string, the form it is stored in.
    pub fn metadata_json(&self) -> Option<String> {
        self.metadata.as_ref().map(to_json_string)
    }
}

fn empty_string() -> Value {
    Value::String(String::new())
}

// ── Triplet ───────────────────────────────────────────────────────

/// A relationship to create between two existing entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triplet {
    #[serde(deserialize_with = "deserialize_id")]
    pub subject_id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub object_id: String,
    #[serde(default)]
    pub predicate: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl Triplet {
    /// Decode one raw item from the `triplets` array.
    pub fn from_value(value: &Value) -> Result<Self> {
        Triplet::deserialize(value).map_err(|e| GraphloadError::InvalidItem {
            kind: "triplet",
            reason: e.to_string(),
        })
    }

    /// Relationship type for native creation.
    pub fn relationship_type(&self) -> String {
        sanitize::relationship_type(self.predicate.as_deref())
    }

    /// Relationship properties, with `metadata` added as a JSON string when present.
    pub fn relationship_properties(&self) -> Map<String, Value> {
        let mut props = self.properties.clone();
        if let Some(metadata) = &self.metadata {
            props.insert("metadata".to_string(), Value::String(to_json_string(metadata)));
        }
        props
    }
}

// ── Strategy ──────────────────────────────────────────────────────

/// How relationships are written once the mode has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipStrategy {
    /// `apoc.create.relationship` with the predicate as a parameter.
    Apoc,
    /// Plain `CREATE` with a sanitized relationship type.
    Native,
}

impl fmt::Display for RelationshipStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apoc => f.write_str("apoc"),
            Self::Native => f.write_str("native"),
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────

/// Best-effort identifier of a raw item for log lines, e.g. `"e1"` or `"e1 -> e2"`.
pub fn item_label(value: &Value) -> String {
    let field = |key: &str| value.get(key).map(scalar_text);
    match (field("id"), field("subject_id"), field("object_id")) {
        (Some(id), _, _) => id,
        (None, Some(s), Some(o)) => format!("{s} -> {o}"),
        (None, Some(s), None) => format!("{s} -> ?"),
        (None, None, Some(o)) => format!("? -> {o}"),
        (None, None, None) => "<unknown>".to_string(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_json_string(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Ids may be strings or integers; both are stored as strings.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Uint(n) => n.to_string(),
    })
}

/// `label` may be a single string, a list of strings, or null.
fn deserialize_labels<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLabels {
        One(String),
        Many(Vec<Option<String>>),
    }

    Ok(match Option::<RawLabels>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(RawLabels::One(label)) => vec![label],
        Some(RawLabels::Many(labels)) => labels
            .into_iter()
            .flatten()
            .filter(|l| !l.is_empty())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_defaults_to_empty_arrays() {
        let doc = Document::from_json_str("{}").unwrap();
        assert!(doc.entities.is_empty());
        assert!(doc.triplets.is_empty());
    }

    #[test]
    fn test_document_rejects_non_object() {
        let err = Document::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, GraphloadError::InvalidDocument(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_document_rejects_malformed_json() {
        let err = Document::from_json_str("{\"entities\": [").unwrap_err();
        assert!(matches!(err, GraphloadError::Json(_)));
    }

    #[test]
    fn test_document_from_missing_path() {
        let err = Document::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, GraphloadError::Io { .. }));
    }

    #[test]
    fn test_entity_defaults() {
        let entity = Entity::from_value(&json!({ "id": "e1" })).unwrap();
        assert_eq!(entity.display_name(), json!("e1"));
        assert_eq!(entity.description(), json!(""));
        assert_eq!(entity.original_text(), json!(""));
        assert_eq!(entity.effective_labels(), vec!["Entity"]);
        assert!(entity.property_map().is_none());
        assert!(entity.metadata_json().is_none());
    }

    #[test]
    fn test_entity_numeric_id() {
        let entity = Entity::from_value(&json!({ "id": 42 })).unwrap();
        assert_eq!(entity.id, "42");
    }

    #[test]
    fn test_entity_non_string_fields_pass_through() {
        let entity = Entity::from_value(&json!({
            "id": "e1",
            "name": 1984,
            "description": ["novel", "dystopia"],
            "original_text": true
        }))
        .unwrap();
        assert_eq!(entity.display_name(), json!(1984));
        assert_eq!(entity.description(), json!(["novel", "dystopia"]));
        assert_eq!(entity.original_text(), json!(true));
    }

    #[test]
    fn test_entity_missing_id_is_an_item_error() {
        let err = Entity::from_value(&json!({ "name": "nameless" })).unwrap_err();
        assert!(matches!(err, GraphloadError::InvalidItem { kind: "entity", .. }));
    }

    #[test]
    fn test_entity_labels_sanitized() {
        let entity = Entity::from_value(&json!({
            "id": "e1",
            "label": ["`Person`", "", null, "!!!", "Tác giả"]
        }))
        .unwrap();
        assert_eq!(entity.effective_labels(), vec!["Person", "Tác giả"]);
    }

    #[test]
    fn test_entity_single_string_label() {
        let entity = Entity::from_value(&json!({ "id": "e1", "label": "Company" })).unwrap();
        assert_eq!(entity.effective_labels(), vec!["Company"]);
    }

    #[test]
    fn test_entity_non_object_properties_ignored() {
        let entity = Entity::from_value(&json!({ "id": "e1", "properties": [1, 2] })).unwrap();
        assert!(entity.property_map().is_none());
    }

    #[test]
    fn test_entity_metadata_json_keeps_unicode() {
        let entity =
            Entity::from_value(&json!({ "id": "e1", "metadata": { "nguồn": "sách" } })).unwrap();
        assert_eq!(entity.metadata_json().as_deref(), Some(r#"{"nguồn":"sách"}"#));
    }

    #[test]
    fn test_triplet_relationship_properties_include_metadata() {
        let triplet = Triplet::from_value(&json!({
            "subject_id": "a",
            "object_id": "b",
            "predicate": "works at",
            "properties": { "since": 2020 },
            "metadata": { "page": 3 }
        }))
        .unwrap();
        assert_eq!(triplet.relationship_type(), "WORKS_AT");

        let props = triplet.relationship_properties();
        assert_eq!(props.get("since"), Some(&json!(2020)));
        assert_eq!(props.get("metadata"), Some(&json!("{\"page\":3}")));
    }

    #[test]
    fn test_triplet_requires_endpoints() {
        let err = Triplet::from_value(&json!({ "subject_id": "a" })).unwrap_err();
        assert!(matches!(err, GraphloadError::InvalidItem { kind: "triplet", .. }));
    }

    #[test]
    fn test_item_label() {
        assert_eq!(item_label(&json!({ "id": "e1" })), "e1");
        assert_eq!(item_label(&json!({ "id": 7 })), "7");
        assert_eq!(
            item_label(&json!({ "subject_id": "a", "object_id": "b" })),
            "a -> b"
        );
        assert_eq!(item_label(&json!({ "subject_id": "a" })), "a -> ?");
        assert_eq!(item_label(&json!("bare")), "<unknown>");
    }
}
