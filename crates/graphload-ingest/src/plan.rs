//! Dry-run writer: renders statements without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use graphload_core::{Entity, RelationshipStrategy, Triplet};
use graphload_graph::statements::{
    apoc_relationship_statement, entity_statement, native_relationship_statement,
};
use graphload_graph::{GraphError, Statement};

/// Records every statement a load would run.
///
/// Tracks which entity ids have been "created" so that a relationship between
/// unknown ids reports zero created, as the live `MATCH` would.
///
/// Nodes already in the database are invisible here. When the load keeps
/// existing data, a relationship to such a node reports zero created even
/// though a live run would create it.
#[derive(Debug, Default)]
pub struct PlanWriter {
    apoc_available: bool,
    state: Mutex<PlanState>,
}

#[derive(Debug, Default)]
struct PlanState {
    statements: Vec<Statement>,
    node_counts: HashMap<String, i64>,
    cleared: bool,
}

impl PlanWriter {
    /// A planner that reports APOC as available or not.
    pub fn new(apoc_available: bool) -> Self {
        Self {
            apoc_available,
            ..Default::default()
        }
    }

    /// All statements recorded so far, in order.
    pub fn statements(&self) -> Vec<Statement> {
        self.lock().statements.clone()
    }

    /// Whether a clear was requested.
    pub fn cleared(&self) -> bool {
        self.lock().cleared
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PlanState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl crate::GraphWriter for PlanWriter {
    async fn clear(&self) -> Result<(), GraphError> {
        let mut state = self.lock();
        state.cleared = true;
        state.node_counts.clear();
        Ok(())
    }

    async fn create_entity(&self, entity: &Entity) -> Result<(), GraphError> {
        let mut state = self.lock();
        state.statements.push(entity_statement(entity));
        *state.node_counts.entry(entity.id.clone()).or_default() += 1;
        Ok(())
    }

    async fn supports_apoc(&self) -> bool {
        self.apoc_available
    }

    async fn create_relationship(
        &self,
        triplet: &Triplet,
        strategy: RelationshipStrategy,
    ) -> Result<i64, GraphError> {
        let stmt = match strategy {
            RelationshipStrategy::Apoc => apoc_relationship_statement(triplet),
            RelationshipStrategy::Native => native_relationship_statement(triplet),
        };
        let mut state = self.lock();
        state.statements.push(stmt);

        let subjects = state.node_counts.get(&triplet.subject_id).copied().unwrap_or(0);
        let objects = state.node_counts.get(&triplet.object_id).copied().unwrap_or(0);
        Ok(subjects * objects)
    }
}
