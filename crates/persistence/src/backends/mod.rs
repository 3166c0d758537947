//! Backend implementations.
//!
//! | Backend | Description |
//! |---------|-------------|
//! | Elasticsearch | Primary and collection indices on an Elasticsearch cluster |
//!
//! The [`memory`] module provides an in-memory index client that the
//! Elasticsearch backend can run on for tests and dry runs.
//!
//! # Example
//!
//! ```no_run
//! use gdc_persistence::backends::create_backend;
//! use gdc_persistence::config::BackendConfig;
//! use gdc_persistence::types::HostingUrls;
//!
//! let config = BackendConfig::new(
//!     "http://localhost:9200/wis2-discovery-metadata",
//!     "wis2-gdc-collections",
//!     HostingUrls::new("https://ewc.example.org", "https://aws.example.org"),
//! );
//! let backend = create_backend("Elasticsearch".parse().unwrap(), config).unwrap();
//! assert_eq!(backend.name(), "elasticsearch");
//! ```

pub mod elasticsearch;
pub mod memory;

use crate::config::BackendConfig;
use crate::core::{Backend, BackendKind};
use crate::error::{ConfigError, StorageResult};

/// Builds the backend of the given kind from its definitions.
pub fn create_backend(kind: BackendKind, config: BackendConfig) -> StorageResult<Box<dyn Backend>> {
    match kind {
        BackendKind::Elasticsearch => Ok(Box::new(
            elasticsearch::ElasticsearchBackend::new(config)?,
        )),
        BackendKind::Custom(name) => Err(ConfigError::UnknownBackend {
            name: name.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HostingUrls;

    #[test]
    fn test_create_elasticsearch_backend() {
        let config = BackendConfig::new(
            "http://localhost:9200/geo",
            "collections",
            HostingUrls::new("https://ewc.example.org", "https://aws.example.org"),
        );
        let backend = create_backend(BackendKind::Elasticsearch, config).unwrap();
        assert_eq!(backend.kind(), BackendKind::Elasticsearch);
    }

    #[test]
    fn test_custom_backend_is_unknown() {
        let config = BackendConfig::new(
            "http://localhost:9200/geo",
            "collections",
            HostingUrls::new("https://ewc.example.org", "https://aws.example.org"),
        );
        let err = create_backend(BackendKind::Custom("tinydb"), config).unwrap_err();
        assert!(err.to_string().contains("tinydb"));
    }
}
