//! Write operations for the knowledge graph.
//!
//! Entities are created with plain `CREATE`, so loading the same document
//! twice without clearing produces duplicates. Relationships match their
//! endpoints by the `id` property on any label.

use graphload_core::{Entity, RelationshipStrategy, Triplet};
use neo4rs::query;

use crate::client::{GraphClient, GraphError};
use crate::statements::{
    apoc_relationship_statement, entity_statement, native_relationship_statement, CREATED_COLUMN,
};

impl GraphClient {
    /// Delete every node and relationship in the database.
    pub async fn clear_graph(&self) -> Result<(), GraphError> {
        self.run(query("MATCH (n) DETACH DELETE n")).await?;
        tracing::info!("Deleted existing graph data");
        Ok(())
    }

    /// Create one node for an entity.
    pub async fn create_entity(&self, entity: &Entity) -> Result<(), GraphError> {
        self.run(entity_statement(entity).into_query()).await
    }

    /// Create a relationship using the given strategy.
    ///
    /// Returns how many relationships were created; zero means no node pair
    /// matched the subject and object ids.
    pub async fn create_relationship(
        &self,
        triplet: &Triplet,
        strategy: RelationshipStrategy,
    ) -> Result<i64, GraphError> {
        match strategy {
            RelationshipStrategy::Apoc => self.create_relationship_apoc(triplet).await,
            RelationshipStrategy::Native => self.create_relationship_native(triplet).await,
        }
    }

    /// Create a relationship through `apoc.create.relationship`.
    pub async fn create_relationship_apoc(&self, triplet: &Triplet) -> Result<i64, GraphError> {
        let q = apoc_relationship_statement(triplet).into_query();
        self.query_count(q, CREATED_COLUMN).await
    }

    /// Create a relationship with native Cypher and a sanitized type.
    pub async fn create_relationship_native(&self, triplet: &Triplet) -> Result<i64, GraphError> {
        let q = native_relationship_statement(triplet).into_query();
        self.query_count(q, CREATED_COLUMN).await
    }
}
