//! Record persistence for Elasticsearch.
//!
//! Saving a record is a strictly ordered sequence of requests:
//!
//! 1. index the record into the primary index, which assigns its id
//! 2. for each collection link, in order, index a copy carrying the record id
//!    into the collection index
//! 3. update the primary document with the rewritten links
//!
//! Nothing is rolled back when a later step fails.

use serde_json::Value;

use crate::core::IndexClient;
use crate::error::{BackendError, SaveStep, StorageResult};
use crate::types::{
    HostingEnvironment, LinkRetention, MetadataRecord, SaveOutcome, collection_document,
    is_collection_link, rewritten_link,
};

use super::backend::ElasticsearchBackend;

fn save_failed(step: SaveStep, document_id: Option<&str>, source: BackendError) -> BackendError {
    BackendError::SaveFailed {
        step,
        document_id: document_id.map(String::from),
        source: Box::new(source),
    }
}

/// Persists a record and splits its collection links into the collection index.
pub(crate) async fn save_record<C: IndexClient>(
    backend: &ElasticsearchBackend<C>,
    record: MetadataRecord,
    environment: HostingEnvironment,
) -> StorageResult<SaveOutcome> {
    let client = backend.client();
    let index = backend.index_name();
    let collection_index = backend.collection_index();
    let base_url = backend.config().hosting.base_url(environment);
    let retention = backend.config().link_retention;

    tracing::debug!(environment = %environment, base_url = %base_url, "Saving record");

    let doc_id = client
        .index_document(index, record.to_value())
        .await
        .map_err(|e| save_failed(SaveStep::IndexRecord, None, e))?;

    let mut links: Vec<Value> = Vec::with_capacity(record.links().len());
    let mut collection_ids = Vec::new();

    for link in record.links() {
        let collection = match link.as_object() {
            Some(link) if is_collection_link(link) => link,
            _ => {
                if retention == LinkRetention::PreserveOthers {
                    links.push(link.clone());
                }
                continue;
            }
        };

        let collection_id = client
            .index_document(collection_index, collection_document(collection, &doc_id))
            .await
            .map_err(|e| save_failed(SaveStep::IndexCollection, Some(&doc_id), e))?;

        tracing::debug!(
            record_id = %doc_id,
            collection_id = %collection_id,
            "Indexed collection link"
        );

        links.push(rewritten_link(collection, base_url, &collection_id));
        collection_ids.push(collection_id);
    }

    let updated = record.with_links(links);

    client
        .update_document(index, &doc_id, updated.to_value())
        .await
        .map_err(|e| save_failed(SaveStep::UpdateRecord, Some(&doc_id), e))?;

    tracing::info!(
        record_id = %doc_id,
        collections = collection_ids.len(),
        environment = %environment,
        "Saved metadata record"
    );

    Ok(SaveOutcome {
        id: doc_id,
        collection_ids,
        record: updated,
    })
}
