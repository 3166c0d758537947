//! Elasticsearch index schema and provisioning.
//!
//! The primary index gets a fixed mapping: `geometry` as a geo shape and the
//! searchable text fields with an exact-match `raw` keyword sub-field. The
//! collection index is created without a body and uses engine defaults.

use serde_json::{Value, json};

use crate::core::IndexClient;
use crate::error::{BackendError, ProvisioningError, StorageResult};

use super::backend::ElasticsearchBackend;

/// Text fields under `properties` that get a `raw` keyword sub-field.
pub const KEYWORD_PROPERTIES: [&str; 5] = [
    "type",
    "title",
    "description",
    "wmo:topicHierarchy",
    "wmo:dataPolicy",
];

/// A `text` field with an exact-match `raw` keyword sub-field.
fn text_with_raw() -> Value {
    json!({
        "type": "text",
        "fields": {
            "raw": {
                "type": "keyword"
            }
        }
    })
}

/// Creates the settings and mappings of the primary index.
pub fn primary_index_body() -> Value {
    let properties: serde_json::Map<String, Value> = KEYWORD_PROPERTIES
        .iter()
        .map(|name| (name.to_string(), text_with_raw()))
        .collect();

    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 0
        },
        "mappings": {
            "properties": {
                "geometry": {
                    "type": "geo_shape"
                },
                "id": text_with_raw(),
                "properties": {
                    "properties": properties
                }
            }
        }
    })
}

/// Recreates the primary and collection indices.
///
/// If the primary index exists, both indices are deleted first; a missing
/// collection index is skipped. The primary index is then created with
/// [`primary_index_body`] and the collection index without a body.
pub async fn recreate_indices<C: IndexClient>(backend: &ElasticsearchBackend<C>) -> StorageResult<()> {
    let client = backend.client();
    let index = backend.index_name();
    let collection_index = backend.collection_index();

    let exists = client
        .index_exists(index)
        .await
        .map_err(|e| ProvisioningError::ExistsCheckFailed {
            index: index.to_string(),
            message: e.to_string(),
        })?;

    if exists {
        for name in [index, collection_index] {
            tracing::debug!("Deleting index {}", name);
            client
                .delete_index(name)
                .await
                .map_err(|e| delete_failed(name, e))?;
        }
    }

    tracing::debug!("Creating index {}", index);
    client
        .create_index(index, Some(primary_index_body()))
        .await
        .map_err(|e| create_failed(index, e))?;

    tracing::debug!("Creating index {}", collection_index);
    client
        .create_index(collection_index, None)
        .await
        .map_err(|e| create_failed(collection_index, e))?;

    tracing::info!(
        index = %index,
        collection_index = %collection_index,
        "Provisioned Elasticsearch indices"
    );

    Ok(())
}

fn delete_failed(index: &str, err: BackendError) -> ProvisioningError {
    ProvisioningError::DeleteFailed {
        index: index.to_string(),
        message: err.to_string(),
    }
}

fn create_failed(index: &str, err: BackendError) -> ProvisioningError {
    ProvisioningError::CreateFailed {
        index: index.to_string(),
        message: err.to_string(),
    }
}
