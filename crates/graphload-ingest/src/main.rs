//! CLI entry point for the graphload document loader.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use graphload_core::{RelationshipMode, Settings};
use graphload_graph::{GraphClient, GraphConfig};

use graphload_ingest::{LoadOptions, LoadReport, Loader, PlanWriter};

#[derive(Parser)]
#[command(name = "graphload")]
#[command(about = "Load entities and relationship triplets from JSON into Neo4j")]
struct Cli {
    /// JSON document to load (default: loader.input from config).
    input: Option<PathBuf>,

    /// Config file prefix (default: graphload).
    #[arg(short, long, default_value = "graphload")]
    config: String,

    /// Neo4j URI, e.g. bolt://127.0.0.1:7687.
    #[arg(long)]
    uri: Option<String>,

    /// Neo4j user name.
    #[arg(long)]
    user: Option<String>,

    /// Neo4j password.
    #[arg(long)]
    password: Option<String>,

    /// Relationship creation mode: auto, apoc, native.
    #[arg(short, long)]
    mode: Option<RelationshipMode>,

    /// Keep existing graph data instead of deleting it first.
    #[arg(long)]
    keep_existing: bool,

    /// Render statements without connecting to Neo4j.
    ///
    /// Only nodes created by this run are known, so with --keep-existing a
    /// relationship to a node already in the database is reported as failed.
    #[arg(long)]
    dry_run: bool,

    /// Assume APOC is installed when planning a dry run in auto mode.
    #[arg(long, requires = "dry_run")]
    assume_apoc: bool,

    /// Exit with an error if any entity or triplet failed.
    #[arg(long)]
    strict: bool,

    /// Report format printed to stdout.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let settings = resolve_settings(&cli)?;
    let options = LoadOptions::from(&settings.loader);
    let input = settings.loader.input.clone();

    let report = if cli.dry_run {
        if !settings.loader.clear_before_load {
            tracing::warn!(
                "Dry run with existing data kept: relationships to nodes not in this document will be reported as failed"
            );
        }
        let loader = Loader::new(PlanWriter::new(cli.assume_apoc), options);
        let report = loader.load_file(&input).await?;
        for stmt in loader.writer().statements() {
            let params = serde_json::Value::Object(stmt.params);
            tracing::debug!(cypher = %stmt.cypher, %params, "Planned statement");
        }
        report
    } else {
        let graph = GraphClient::connect(&GraphConfig::from(&settings.neo4j)).await?;
        let loader = Loader::new(graph.clone(), options);
        let report = loader.load_file(&input).await?;
        match (graph.count_nodes().await, graph.count_relationships().await) {
            (Ok(nodes), Ok(relationships)) => {
                tracing::info!(nodes, relationships, "Graph totals after load");
            }
            (Err(e), _) | (_, Err(e)) => tracing::warn!(error = %e, "Could not read graph totals"),
        }
        report
    };

    print_report(&report, cli.report)?;

    check_strict(cli.strict, &report)
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Layer CLI flags over file and environment settings.
fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = Settings::load(&cli.config)?;
    apply_overrides(cli, &mut settings);
    Ok(settings)
}

fn apply_overrides(cli: &Cli, settings: &mut Settings) {
    if let Some(input) = &cli.input {
        settings.loader.input = input.clone();
    }
    if let Some(uri) = &cli.uri {
        settings.neo4j.uri = uri.clone();
    }
    if let Some(user) = &cli.user {
        settings.neo4j.user = user.clone();
    }
    if let Some(password) = &cli.password {
        settings.neo4j.password = password.clone();
    }
    if let Some(mode) = cli.mode {
        settings.loader.relationship_mode = mode;
    }
    if cli.keep_existing {
        settings.loader.clear_before_load = false;
    }
}

/// Under `--strict`, any failed item fails the run.
fn check_strict(strict: bool, report: &LoadReport) -> anyhow::Result<()> {
    if strict && !report.is_clean() {
        anyhow::bail!(
            "{} of {} items failed",
            report.failures.len(),
            report.entities.total + report.relationships.total
        );
    }
    Ok(())
}

fn print_report(report: &LoadReport, format: ReportFormat) -> anyhow::Result<()> {
    match format {
        ReportFormat::Text => print!("{report}"),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
