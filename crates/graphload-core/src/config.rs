//! Configuration management for graphload.
//!
//! Configuration is loaded from (highest priority first):
//! 1. `NEO4J_URI`, `NEO4J_USERNAME`, `NEO4J_PASSWORD`
//! 2. Environment variables (`GRAPHLOAD__` prefix, `__` separator)
//! 3. Config file (`graphload.toml` by default)
//! 4. Defaults
//!
//! Command-line flags are applied on top by the binary.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// All settings for one load run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub neo4j: Neo4jSettings,
    #[serde(default)]
    pub loader: LoaderSettings,
}

/// Connection settings, from the `[neo4j]` section.
#[derive(Clone, Deserialize)]
pub struct Neo4jSettings {
    #[serde(default = "default_uri")]
    pub uri: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

/// Load behaviour, from the `[loader]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderSettings {
    /// JSON document to load.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Delete every node and relationship before loading.
    #[serde(default = "default_true")]
    pub clear_before_load: bool,

    /// How relationships are created.
    #[serde(default)]
    pub relationship_mode: RelationshipMode,
}

/// Requested relationship creation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipMode {
    /// Use APOC when the server has it, native `CREATE` otherwise.
    #[default]
    Auto,
    /// Always use `apoc.create.relationship`.
    Apoc,
    /// Always use native `CREATE` with a sanitized relationship type.
    Native,
}

impl std::str::FromStr for RelationshipMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "apoc" => Ok(Self::Apoc),
            "native" => Ok(Self::Native),
            _ => Err(format!("Invalid relationship mode: {s}. Choose: auto, apoc, native")),
        }
    }
}

impl Settings {
    /// Load settings from `<file_prefix>.toml` (optional) and the process environment.
    pub fn load(file_prefix: &str) -> Result<Self> {
        Self::load_with_env(file_prefix, std::env::vars().collect())
    }

    /// Like [`Settings::load`], reading both the `GRAPHLOAD__` variables and
    /// the conventional `NEO4J_*` variables from `env` instead of the process.
    pub fn load_with_env(file_prefix: &str, env: ::config::Map<String, String>) -> Result<Self> {
        let var = |key: &str| env.get(key).cloned();
        let cfg = ::config::Config::builder()
            .add_source(::config::File::with_name(file_prefix).required(false))
            .set_override_option("neo4j.uri", var("NEO4J_URI"))?
            .set_override_option("neo4j.user", var("NEO4J_USERNAME"))?
            .set_override_option("neo4j.password", var("NEO4J_PASSWORD"))?
            .add_source(
                ::config::Environment::with_prefix("GRAPHLOAD")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.clone())),
            )
            .build()?;

        let settings: Settings = cfg.try_deserialize()?;
        tracing::debug!(
            uri = %settings.neo4j.uri,
            user = %settings.neo4j.user,
            input = %settings.loader.input.display(),
            "Settings loaded"
        );
        Ok(settings)
    }
}

impl fmt::Debug for Neo4jSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neo4jSettings")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("fetch_size", &self.fetch_size)
            .finish()
    }
}

fn default_uri() -> String {
    "bolt://127.0.0.1:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_password() -> String {
    "StrongPass123!".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

fn default_input() -> PathBuf {
    PathBuf::from("graph_documents_v3.json")
}

fn default_true() -> bool {
    true
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: default_password(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            input: default_input(),
            clear_before_load: default_true(),
            relationship_mode: RelationshipMode::default(),
        }
    }
}
