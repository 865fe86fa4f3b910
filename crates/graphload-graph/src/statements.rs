//! Cypher statement builders for entities and triplets.
//!
//! Builders are pure: they render Cypher text plus a parameter map and never
//! touch the database. Only sanitized identifiers reach the Cypher text,
//! always wrapped in backticks.

use graphload_core::sanitize;
use graphload_core::{Entity, Triplet};
use neo4rs::{query, Query};
use serde_json::{Map, Value};

use crate::bolt::json_to_bolt;

/// Column holding the number of relationships a statement created.
pub const CREATED_COLUMN: &str = "created";

/// A rendered Cypher statement with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub cypher: String,
    pub params: Map<String, Value>,
}

impl Statement {
    fn new(cypher: String) -> Self {
        Self {
            cypher,
            params: Map::new(),
        }
    }

    fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Convert into a neo4rs query, translating parameters to Bolt values.
    pub fn into_query(self) -> Query {
        self.params
            .iter()
            .fold(query(&self.cypher), |q, (key, value)| {
                q.param(key, json_to_bolt(value))
            })
    }
}

/// `CREATE` one node with its labels, base fields, metadata, and dynamic properties.
///
/// Dynamic properties are assigned last, so a property named e.g. `name`
/// overrides the base field.
pub fn entity_statement(entity: &Entity) -> Statement {
    let labels = entity
        .effective_labels()
        .iter()
        .map(|l| format!("`{l}`"))
        .collect::<Vec<_>>()
        .join(":");

    let mut assignments = vec![
        "n.id = $id".to_string(),
        "n.name = $name".to_string(),
        "n.description = $description".to_string(),
        "n.original_text = $original_text".to_string(),
    ];

    let mut stmt = Statement::new(String::new())
        .param("id", entity.id.clone())
        .param("name", entity.display_name())
        .param("description", entity.description())
        .param("original_text", entity.original_text());

    if let Some(metadata) = entity.metadata_json() {
        assignments.push("n.metadata = $metadata".to_string());
        stmt = stmt.param("metadata", metadata);
    }

    if let Some(props) = entity.property_map() {
        for (i, (raw_key, value)) in props.iter().enumerate() {
            let Some(key) = sanitize::property_key(raw_key) else {
                tracing::debug!(entity_id = %entity.id, key = %raw_key, "Skipping unusable property key");
                continue;
            };
            let param = format!("prop_{i}");
            assignments.push(format!("n.`{key}` = ${param}"));
            stmt = stmt.param(&param, value.clone());
        }
    }

    stmt.cypher = format!(
        "CREATE (n:{labels})\nSET {}",
        assignments.join(",\n    ")
    );
    stmt
}

/// Native `CREATE` with the sanitized relationship type spliced in.
pub fn native_relationship_statement(triplet: &Triplet) -> Statement {
    let rel_type = triplet.relationship_type();
    let cypher = format!(
        "MATCH (a {{id: $subject_id}})
MATCH (b {{id: $object_id}})
CREATE (a)-[r:`{rel_type}` $props]->(b)
RETURN count(r) AS {CREATED_COLUMN}"
    );

    Statement::new(cypher)
        .param("subject_id", triplet.subject_id.clone())
        .param("object_id", triplet.object_id.clone())
        .param("props", Value::Object(triplet.relationship_properties()))
}

/// `apoc.create.relationship` with the predicate passed as a parameter.
pub fn apoc_relationship_statement(triplet: &Triplet) -> Statement {
    let cypher = format!(
        "MATCH (a {{id: $subject_id}})
MATCH (b {{id: $object_id}})
CALL apoc.create.relationship(a, $predicate, $properties, b) YIELD rel
RETURN count(rel) AS {CREATED_COLUMN}"
    );

    let predicate = triplet
        .predicate
        .clone()
        .unwrap_or_else(|| sanitize::DEFAULT_RELATIONSHIP_TYPE.to_string());

    Statement::new(cypher)
        .param("subject_id", triplet.subject_id.clone())
        .param("object_id", triplet.object_id.clone())
        .param("predicate", predicate)
        .param("properties", Value::Object(triplet.relationship_properties()))
}
