//! Outcome of a load run.

use std::fmt;

use chrono::{DateTime, Utc};
use graphload_core::RelationshipStrategy;
use serde::Serialize;
use uuid::Uuid;

/// Summary of one load run, printable as text or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub cleared: bool,
    /// `None` when there were no triplets to write.
    pub strategy: Option<RelationshipStrategy>,
    pub entities: ItemCounts,
    pub relationships: ItemCounts,
    pub failures: Vec<ItemFailure>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ItemCounts {
    pub total: usize,
    pub created: usize,
    pub failed: usize,
}

/// One entity or triplet that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub kind: ItemKind,
    /// The entity id or `subject -> object`.
    pub item: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Entity,
    Triplet,
}

impl LoadReport {
    pub(crate) fn start() -> Self {
        let now = Utc::now();
        Self {
            run_id: Uuid::new_v4(),
            started_at: now,
            finished_at: now,
            cleared: false,
            strategy: None,
            entities: ItemCounts::default(),
            relationships: ItemCounts::default(),
            failures: Vec::new(),
        }
    }

    pub(crate) fn record_failure(&mut self, kind: ItemKind, item: String, reason: String) {
        match kind {
            ItemKind::Entity => self.entities.failed += 1,
            ItemKind::Triplet => self.relationships.failed += 1,
        }
        self.failures.push(ItemFailure { kind, item, reason });
    }

    pub(crate) fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    /// True when every entity and triplet was written.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => f.write_str("entity"),
            Self::Triplet => f.write_str("triplet"),
        }
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Load {} finished in {} ms", self.run_id, self.duration_ms())?;
        writeln!(
            f,
            "  entities:      {} created, {} failed, {} total",
            self.entities.created, self.entities.failed, self.entities.total
        )?;
        let strategy = self
            .strategy
            .map(|s| format!(" ({s})"))
            .unwrap_or_default();
        writeln!(
            f,
            "  relationships: {} created, {} failed, {} total{strategy}",
            self.relationships.created, self.relationships.failed, self.relationships.total
        )?;
        for failure in &self.failures {
            writeln!(f, "  - {} {}: {}", failure.kind, failure.item, failure.reason)?;
        }
        Ok(())
    }
}
