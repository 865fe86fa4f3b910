//! graphload-ingest: Loads entity/triplet documents into Neo4j.
//!
//! Reads a JSON document, optionally clears the graph, creates one node per
//! entity and one relationship per triplet, and reports what failed.
//! Failures are per item: a bad entity or triplet is logged and the load
//! carries on.

pub mod error;
pub mod loader;
pub mod plan;
pub mod report;
pub mod writer;

pub use loader::{LoadOptions, Loader};
pub use plan::PlanWriter;
pub use report::LoadReport;
pub use writer::GraphWriter;
