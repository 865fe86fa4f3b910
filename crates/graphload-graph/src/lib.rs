//! graphload-graph — Neo4j client for loading entities and triplets.
//!
//! Every write goes through this crate. Labels, relationship types, and
//! property keys are sanitized before they are spliced into Cypher; all
//! values travel as query parameters.

pub mod bolt;
pub mod client;
pub mod mutations;
pub mod queries;
pub mod statements;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use statements::Statement;
