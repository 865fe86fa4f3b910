//! Load orchestration: document → nodes → relationships → report.

use std::path::Path;

use graphload_core::types::item_label;
use graphload_core::{
    Document, Entity, LoaderSettings, RelationshipMode, RelationshipStrategy, Triplet,
};
use tracing::Instrument;

use crate::error::Result;
use crate::report::{ItemKind, LoadReport};
use crate::writer::GraphWriter;

/// Knobs for a single load run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub clear_before_load: bool,
    pub relationship_mode: RelationshipMode,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::from(&LoaderSettings::default())
    }
}

impl From<&LoaderSettings> for LoadOptions {
    fn from(settings: &LoaderSettings) -> Self {
        Self {
            clear_before_load: settings.clear_before_load,
            relationship_mode: settings.relationship_mode,
        }
    }
}

/// Writes documents through a [`GraphWriter`].
pub struct Loader<W> {
    writer: W,
    options: LoadOptions,
}

impl<W: GraphWriter> Loader<W> {
    pub fn new(writer: W, options: LoadOptions) -> Self {
        Self { writer, options }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Read a document from disk and load it.
    pub async fn load_file(&self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let path = path.as_ref();
        let document = Document::from_path(path)?;
        tracing::info!(
            path = %path.display(),
            entities = document.entities.len(),
            triplets = document.triplets.len(),
            "Document read"
        );
        self.load_document(&document).await
    }

    /// Load a parsed document.
    ///
    /// Only a failed clear aborts the run. Individual entities and triplets
    /// that fail are logged, recorded in the report, and skipped.
    pub async fn load_document(&self, document: &Document) -> Result<LoadReport> {
        let report = LoadReport::start();
        let span = tracing::info_span!("load", run_id = %report.run_id);
        self.run(document, report).instrument(span).await
    }

    async fn run(&self, document: &Document, mut report: LoadReport) -> Result<LoadReport> {
        if self.options.clear_before_load {
            self.writer.clear().await?;
            report.cleared = true;
        }

        self.load_entities(&document.entities, &mut report).await;

        if !document.triplets.is_empty() {
            let strategy = self.resolve_strategy().await;
            report.strategy = Some(strategy);
            self.load_triplets(&document.triplets, strategy, &mut report)
                .await;
        }

        let report = report.finish();
        tracing::info!(
            entities_created = report.entities.created,
            entities_failed = report.entities.failed,
            relationships_created = report.relationships.created,
            relationships_failed = report.relationships.failed,
            duration_ms = report.duration_ms(),
            "Load finished"
        );
        Ok(report)
    }

    async fn load_entities(&self, items: &[serde_json::Value], report: &mut LoadReport) {
        report.entities.total = items.len();
        tracing::info!(count = items.len(), "Creating entities");

        for raw in items {
            let outcome = match Entity::from_value(raw) {
                Ok(entity) => self
                    .writer
                    .create_entity(&entity)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };

            match outcome {
                Ok(()) => report.entities.created += 1,
                Err(reason) => {
                    let item = item_label(raw);
                    tracing::error!(entity_id = %item, error = %reason, "create_entity failed");
                    report.record_failure(ItemKind::Entity, item, reason);
                }
            }
        }
    }

    async fn load_triplets(
        &self,
        items: &[serde_json::Value],
        strategy: RelationshipStrategy,
        report: &mut LoadReport,
    ) {
        report.relationships.total = items.len();
        tracing::info!(count = items.len(), %strategy, "Creating relationships");

        for raw in items {
            let outcome = match Triplet::from_value(raw) {
                Ok(triplet) => match self.writer.create_relationship(&triplet, strategy).await {
                    Ok(0) => Err("subject or object node not found".to_string()),
                    Ok(_) => Ok(()),
                    Err(e) => Err(e.to_string()),
                },
                Err(e) => Err(e.to_string()),
            };

            match outcome {
                Ok(()) => report.relationships.created += 1,
                Err(reason) => {
                    let item = item_label(raw);
                    tracing::error!(triplet = %item, error = %reason, "create_relationship failed");
                    report.record_failure(ItemKind::Triplet, item, reason);
                }
            }
        }
    }

    async fn resolve_strategy(&self) -> RelationshipStrategy {
        match self.options.relationship_mode {
            RelationshipMode::Apoc => RelationshipStrategy::Apoc,
            RelationshipMode::Native => RelationshipStrategy::Native,
            RelationshipMode::Auto => {
                if self.writer.supports_apoc().await {
                    tracing::info!("APOC detected: using apoc.create.relationship");
                    RelationshipStrategy::Apoc
                } else {
                    tracing::info!(
                        "APOC not detected: using native CREATE with sanitized relationship types"
                    );
                    RelationshipStrategy::Native
                }
            }
        }
    }
}
