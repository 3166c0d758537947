//! Backend abstraction for metadata persistence.
//!
//! This module defines the [`Backend`] trait. A backend provisions whatever
//! persistent structures it needs in [`Backend::setup`] and persists one
//! metadata record, together with the documents derived from it, per call to
//! [`Backend::save`]. Callers never branch on which backend they hold.

use std::fmt::Debug;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::{ConfigError, StorageResult};
use crate::types::{HostingEnvironment, MetadataRecord, SaveOutcome};

/// Identifies the type of backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Elasticsearch (search engine).
    Elasticsearch,
    /// Custom or unknown backend.
    Custom(&'static str),
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Elasticsearch => write!(f, "elasticsearch"),
            BackendKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    /// Parses a backend name such as `Elasticsearch`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elasticsearch" => Ok(BackendKind::Elasticsearch),
            _ => Err(ConfigError::UnknownBackend {
                name: s.to_string(),
            }),
        }
    }
}

/// A metadata persistence backend.
///
/// # Example
///
/// ```ignore
/// use gdc_persistence::core::Backend;
/// use gdc_persistence::types::{HostingEnvironment, MetadataRecord};
///
/// backend.setup().await?;
/// let outcome = backend.save(record, HostingEnvironment::Ewc).await?;
/// println!("stored {} with {} collections", outcome.id, outcome.collection_ids.len());
/// ```
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// Returns the kind of backend.
    fn kind(&self) -> BackendKind;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &'static str;

    /// Provisions the backend, destroying any existing data first.
    async fn setup(&self) -> StorageResult<()>;

    /// Persists a record and the collection documents split out of it.
    ///
    /// Rewritten collection links point at `environment`.
    async fn save(
        &self,
        record: MetadataRecord,
        environment: HostingEnvironment,
    ) -> StorageResult<SaveOutcome>;
}
