//! Read operations: capability probes and graph statistics.

use neo4rs::query;

use crate::client::{GraphClient, GraphError};

/// Probes for the APOC procedure, newest syntax first.
///
/// `SHOW PROCEDURES` exists from Neo4j 4.3; `dbms.procedures()` was removed in 5.
const APOC_PROBES: [&str; 2] = [
    "SHOW PROCEDURES YIELD name WHERE name = 'apoc.create.relationship' RETURN count(*) AS c",
    "CALL dbms.procedures() YIELD name WHERE name = 'apoc.create.relationship' RETURN count(*) AS c",
];

impl GraphClient {
    /// Whether `apoc.create.relationship` is available on the server.
    ///
    /// Never fails: any probe error means "not available".
    pub async fn has_apoc(&self) -> bool {
        for probe in APOC_PROBES {
            match self.query_count(query(probe), "c").await {
                Ok(count) => return count > 0,
                Err(e) => tracing::debug!(probe, error = %e, "APOC probe failed"),
            }
        }
        false
    }

    /// Total number of nodes in the database.
    pub async fn count_nodes(&self) -> Result<i64, GraphError> {
        self.query_count(query("MATCH (n) RETURN count(n) AS c"), "c")
            .await
    }

    /// Total number of relationships in the database.
    pub async fn count_relationships(&self) -> Result<i64, GraphError> {
        self.query_count(query("MATCH ()-[r]->() RETURN count(r) AS c"), "c")
            .await
    }
}
