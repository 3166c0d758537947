//! Subcommand implementations.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use gdc_persistence::backends::create_backend;
use gdc_persistence::backends::elasticsearch::ElasticsearchBackend;
use gdc_persistence::backends::memory::InMemoryIndexClient;
use gdc_persistence::config::BackendConfig;
use gdc_persistence::core::{Backend, BackendKind};
use gdc_persistence::types::{HostingEnvironment, MetadataRecord, SaveOutcome};
use serde_json::{Value, json};
use tracing::info;

/// Deletes and recreates the catalogue indices.
pub async fn setup(kind: BackendKind, config: BackendConfig) -> anyhow::Result<()> {
    let backend = create_backend(kind, config).context("Failed to create backend")?;

    info!(backend = backend.name(), "Setting up indices");
    backend
        .setup()
        .await
        .context("Failed to set up indices")?;
    info!("Indices ready");

    Ok(())
}

/// Reads a metadata record from a file, or from stdin when `file` is `-`.
pub fn read_record(file: &Path) -> anyhow::Result<MetadataRecord> {
    let text = if file == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read record from stdin")?;
        text
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };

    let value: Value = serde_json::from_str(&text).context("Record is not valid JSON")?;
    MetadataRecord::from_value(value).context("Invalid metadata record")
}

/// Saves a record, or previews the save against an in-memory index.
pub async fn register(
    kind: BackendKind,
    config: BackendConfig,
    record: MetadataRecord,
    environment: HostingEnvironment,
    dry_run: bool,
) -> anyhow::Result<SaveOutcome> {
    info!(
        record_id = record.id().unwrap_or("-"),
        environment = %environment,
        dry_run,
        "Registering metadata record"
    );

    let outcome = if dry_run {
        let backend = ElasticsearchBackend::with_client(config, InMemoryIndexClient::new())
            .context("Failed to create dry-run backend")?;
        backend.setup().await.context("Failed to set up dry-run indices")?;
        backend.save(record, environment).await
    } else {
        let backend = create_backend(kind, config).context("Failed to create backend")?;
        backend.save(record, environment).await
    }
    .context("Failed to save record")?;

    info!(
        id = %outcome.id,
        collections = outcome.collection_ids.len(),
        "Record saved"
    );
    Ok(outcome)
}

/// Summarizes a save for printing.
pub fn report(outcome: &SaveOutcome, environment: HostingEnvironment, dry_run: bool) -> Value {
    json!({
        "id": outcome.id,
        "environment": environment.to_string(),
        "dry_run": dry_run,
        "collection_ids": outcome.collection_ids,
        "links": outcome.record.links(),
    })
}
