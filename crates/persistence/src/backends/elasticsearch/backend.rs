//! Elasticsearch backend implementation.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::config::{BackendConfig, ConnectionDescriptor};
use crate::core::{Backend, BackendKind, IndexClient};
use crate::error::StorageResult;
use crate::types::{HostingEnvironment, MetadataRecord, SaveOutcome};

use super::client::EsIndexClient;

/// Elasticsearch backend for discovery metadata records.
///
/// Records live in the primary index named by the connection string. Their
/// collection links are split into a sibling collection index.
pub struct ElasticsearchBackend<C = EsIndexClient> {
    /// The index client.
    client: C,
    /// Definitions the backend was built from.
    config: BackendConfig,
    /// Parsed connection string.
    connection: ConnectionDescriptor,
}

impl<C: Debug> Debug for ElasticsearchBackend<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchBackend")
            .field("client", &self.client)
            .field("connection", &self.connection)
            .field("collection_index", &self.config.collection_index)
            .field("hosting", &self.config.hosting)
            .field("link_retention", &self.config.link_retention)
            .finish()
    }
}

impl ElasticsearchBackend<EsIndexClient> {
    /// Creates a backend connected to the node named by the connection string.
    ///
    /// This only builds the client; nothing is sent until `setup` or `save`.
    pub fn new(config: BackendConfig) -> StorageResult<Self> {
        let connection = config.validate()?;
        let client = EsIndexClient::new(&connection, config.disable_certificate_validation)?;

        tracing::debug!("ES URL: {}", client.node());
        if connection.base_path().is_some() {
            tracing::debug!("ES URL has a basepath");
        }

        Self::from_parts(config, connection, client)
    }
}

impl<C: IndexClient> ElasticsearchBackend<C> {
    /// Creates a backend on top of an existing index client.
    pub fn with_client(config: BackendConfig, client: C) -> StorageResult<Self> {
        let connection = config.validate()?;
        Self::from_parts(config, connection, client)
    }

    fn from_parts(
        config: BackendConfig,
        connection: ConnectionDescriptor,
        client: C,
    ) -> StorageResult<Self> {
        tracing::debug!("ES index: {}", connection.index_name());
        tracing::debug!("ES collections index: {}", config.collection_index);

        Ok(Self {
            client,
            config,
            connection,
        })
    }

    /// Returns the index client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns the backend definitions.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Returns the parsed connection string.
    pub fn connection(&self) -> &ConnectionDescriptor {
        &self.connection
    }

    /// Returns the primary index name.
    pub fn index_name(&self) -> &str {
        self.connection.index_name()
    }

    /// Returns the collection index name.
    pub fn collection_index(&self) -> &str {
        &self.config.collection_index
    }
}

#[async_trait]
impl<C: IndexClient> Backend for ElasticsearchBackend<C> {
    fn kind(&self) -> BackendKind {
        BackendKind::Elasticsearch
    }

    fn name(&self) -> &'static str {
        "elasticsearch"
    }

    async fn setup(&self) -> StorageResult<()> {
        super::schema::recreate_indices(self).await
    }

    async fn save(
        &self,
        record: MetadataRecord,
        environment: HostingEnvironment,
    ) -> StorageResult<SaveOutcome> {
        super::storage::save_record(self, record, environment).await
    }
}
