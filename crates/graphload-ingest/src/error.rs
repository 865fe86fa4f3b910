//! Error types for the graphload-ingest crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Document(#[from] graphload_core::GraphloadError),

    #[error("Graph error: {0}")]
    Graph(#[from] graphload_graph::GraphError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
