//! graphload-core: Shared types, sanitization, and configuration for graphload.
//!
//! This crate provides the pieces every other graphload crate builds on:
//! - The input document model (entities and relationship triplets)
//! - Sanitization of untrusted text into safe Cypher identifiers
//! - Layered settings (file, environment, defaults)
//! - The common error type

pub mod config;
pub mod error;
pub mod sanitize;
pub mod types;

pub use crate::config::{LoaderSettings, Neo4jSettings, RelationshipMode, Settings};
pub use crate::error::GraphloadError;
pub use crate::types::{Document, Entity, RelationshipStrategy, Triplet};
