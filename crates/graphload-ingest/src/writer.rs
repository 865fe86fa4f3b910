//! The seam between the loader and the database.

use graphload_core::{Entity, RelationshipStrategy, Triplet};
use graphload_graph::{GraphClient, GraphError};

/// Destination for a load run.
///
/// [`GraphClient`] writes to Neo4j; [`crate::PlanWriter`] renders the same
/// statements in memory for dry runs.
#[allow(async_fn_in_trait)]
pub trait GraphWriter {
    /// Remove all existing nodes and relationships.
    async fn clear(&self) -> Result<(), GraphError>;

    /// Create one node.
    async fn create_entity(&self, entity: &Entity) -> Result<(), GraphError>;

    /// Whether APOC relationship creation is available.
    async fn supports_apoc(&self) -> bool;

    /// Create one relationship, returning how many were created.
    async fn create_relationship(
        &self,
        triplet: &Triplet,
        strategy: RelationshipStrategy,
    ) -> Result<i64, GraphError>;
}

impl GraphWriter for GraphClient {
    async fn clear(&self) -> Result<(), GraphError> {
        self.clear_graph().await
    }

    async fn create_entity(&self, entity: &Entity) -> Result<(), GraphError> {
        GraphClient::create_entity(self, entity).await
    }

    async fn supports_apoc(&self) -> bool {
        self.has_apoc().await
    }

    async fn create_relationship(
        &self,
        triplet: &Triplet,
        strategy: RelationshipStrategy,
    ) -> Result<i64, GraphError> {
        GraphClient::create_relationship(self, triplet, strategy).await
    }
}
