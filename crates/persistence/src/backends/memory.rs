//! In-memory [`IndexClient`].
//!
//! Keeps indices and documents in process memory and records every request
//! it receives. Used for tests and for previewing a save without a cluster.
//! Documents are assigned random ids, like engine-generated ids.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::core::IndexClient;
use crate::error::BackendError;

const BACKEND_NAME: &str = "memory";

/// A request received by an [`InMemoryIndexClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum IndexOperation {
    /// Index existence check.
    Exists {
        /// Index name.
        index: String,
    },
    /// Index deletion.
    DeleteIndex {
        /// Index name.
        index: String,
    },
    /// Index creation.
    CreateIndex {
        /// Index name.
        index: String,
        /// Settings and mappings, if any.
        body: Option<Value>,
    },
    /// Document indexing.
    IndexDocument {
        /// Index name.
        index: String,
        /// Assigned id, if the write succeeded.
        id: Option<String>,
        /// Document body.
        document: Value,
    },
    /// Document update.
    UpdateDocument {
        /// Index name.
        index: String,
        /// Document id.
        id: String,
        /// Fields merged into the stored document.
        document: Value,
    },
}

impl IndexOperation {
    /// Returns true for requests that write documents.
    pub fn is_document_write(&self) -> bool {
        matches!(
            self,
            IndexOperation::IndexDocument { .. } | IndexOperation::UpdateDocument { .. }
        )
    }
}

#[derive(Debug, Default)]
struct MemoryIndex {
    body: Option<Value>,
    documents: Vec<(String, Value)>,
    write_blocked: bool,
    update_blocked: bool,
}

#[derive(Debug, Default)]
struct State {
    indices: HashMap<String, MemoryIndex>,
    operations: Vec<IndexOperation>,
}

/// An index client that keeps everything in memory.
#[derive(Debug, Default)]
pub struct InMemoryIndexClient {
    state: RwLock<State>,
}

impl InMemoryIndexClient {
    /// Creates an empty client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the index exists.
    pub fn has_index(&self, index: &str) -> bool {
        self.state.read().indices.contains_key(index)
    }

    /// Returns the body an index was created with.
    pub fn index_body(&self, index: &str) -> Option<Value> {
        self.state
            .read()
            .indices
            .get(index)
            .and_then(|i| i.body.clone())
    }

    /// Returns the documents of an index in insertion order.
    pub fn documents(&self, index: &str) -> Vec<(String, Value)> {
        self.state
            .read()
            .indices
            .get(index)
            .map(|i| i.documents.clone())
            .unwrap_or_default()
    }

    /// Returns a document by id.
    pub fn document(&self, index: &str, id: &str) -> Option<Value> {
        self.state.read().indices.get(index).and_then(|i| {
            i.documents
                .iter()
                .find(|(doc_id, _)| doc_id == id)
                .map(|(_, doc)| doc.clone())
        })
    }

    /// Returns every request received so far.
    pub fn operations(&self) -> Vec<IndexOperation> {
        self.state.read().operations.clone()
    }

    /// Rejects further document writes to an index, creating it if needed.
    pub fn block_writes(&self, index: &str) {
        self.state
            .write()
            .indices
            .entry(index.to_string())
            .or_default()
            .write_blocked = true;
    }

    /// Rejects further document updates to an index, creating it if needed.
    ///
    /// New documents can still be indexed.
    pub fn block_updates(&self, index: &str) {
        self.state
            .write()
            .indices
            .entry(index.to_string())
            .or_default()
            .update_blocked = true;
    }

    fn blocked(index: &str) -> BackendError {
        BackendError::RequestFailed {
            backend_name: BACKEND_NAME.to_string(),
            status: 403,
            body: format!("cluster_block_exception: index [{}] blocked", index),
        }
    }
}

/// Merges `patch` into `target` the way a partial document update does:
/// objects merge recursively, everything else is replaced.
fn merge(target: &mut Value, patch: Value) {
    match patch {
        Value::Object(patch) if target.is_object() => {
            if let Some(target) = target.as_object_mut() {
                merge_objects(target, patch);
            }
        }
        patch => *target = patch,
    }
}

fn merge_objects(target: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        match target.get_mut(&key) {
            Some(existing) => merge(existing, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}

#[async_trait]
impl IndexClient for InMemoryIndexClient {
    async fn index_exists(&self, index: &str) -> Result<bool, BackendError> {
        let mut state = self.state.write();
        state.operations.push(IndexOperation::Exists {
            index: index.to_string(),
        });
        Ok(state.indices.contains_key(index))
    }

    async fn delete_index(&self, index: &str) -> Result<(), BackendError> {
        let mut state = self.state.write();
        state.operations.push(IndexOperation::DeleteIndex {
            index: index.to_string(),
        });
        state.indices.remove(index);
        Ok(())
    }

    async fn create_index(&self, index: &str, body: Option<Value>) -> Result<(), BackendError> {
        let mut state = self.state.write();
        state.operations.push(IndexOperation::CreateIndex {
            index: index.to_string(),
            body: body.clone(),
        });

        if state.indices.contains_key(index) {
            return Err(BackendError::RequestFailed {
                backend_name: BACKEND_NAME.to_string(),
                status: 400,
                body: format!("resource_already_exists_exception: index [{}]", index),
            });
        }

        state.indices.insert(
            index.to_string(),
            MemoryIndex {
                body,
                ..Default::default()
            },
        );
        Ok(())
    }

    async fn index_document(&self, index: &str, document: Value) -> Result<String, BackendError> {
        let mut state = self.state.write();
        let target = state.indices.entry(index.to_string()).or_default();

        let id = if target.write_blocked {
            None
        } else {
            let id = uuid::Uuid::new_v4().simple().to_string();
            target.documents.push((id.clone(), document.clone()));
            Some(id)
        };

        state.operations.push(IndexOperation::IndexDocument {
            index: index.to_string(),
            id: id.clone(),
            document,
        });

        id.ok_or_else(|| Self::blocked(index))
    }

    async fn update_document(
        &self,
        index: &str,
        id: &str,
        document: Value,
    ) -> Result<(), BackendError> {
        let mut state = self.state.write();
        state.operations.push(IndexOperation::UpdateDocument {
            index: index.to_string(),
            id: id.to_string(),
            document: document.clone(),
        });

        let target = state
            .indices
            .get_mut(index)
            .ok_or_else(|| BackendError::IndexNotFound {
                index: index.to_string(),
            })?;

        if target.write_blocked || target.update_blocked {
            return Err(Self::blocked(index));
        }

        let stored = target
            .documents
            .iter_mut()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(_, doc)| doc)
            .ok_or_else(|| BackendError::RequestFailed {
                backend_name: BACKEND_NAME.to_string(),
                status: 404,
                body: format!("document_missing_exception: [{}]", id),
            })?;

        merge(stored, document);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_and_delete_index() {
        let client = InMemoryIndexClient::new();
        assert!(!client.index_exists("geo").await.unwrap());

        client
            .create_index("geo", Some(json!({"mappings": {}})))
            .await
            .unwrap();
        assert!(client.index_exists("geo").await.unwrap());
        assert_eq!(client.index_body("geo"), Some(json!({"mappings": {}})));

        let err = client.create_index("geo", None).await.unwrap_err();
        assert!(matches!(err, BackendError::RequestFailed { status: 400, .. }));

        client.delete_index("geo").await.unwrap();
        assert!(!client.has_index("geo"));

        // Deleting a missing index is a no-op
        client.delete_index("geo").await.unwrap();
    }

    #[tokio::test]
    async fn test_index_assigns_unique_ids() {
        let client = InMemoryIndexClient::new();
        let a = client.index_document("geo", json!({"n": 1})).await.unwrap();
        let b = client.index_document("geo", json!({"n": 2})).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(client.document("geo", &a), Some(json!({"n": 1})));
        assert_eq!(client.documents("geo").len(), 2);
    }

    #[tokio::test]
    async fn test_update_merges_objects_and_replaces_arrays() {
        let client = InMemoryIndexClient::new();
        let id = client
            .index_document(
                "geo",
                json!({"properties": {"title": "T", "type": "dataset"}, "links": [1, 2]}),
            )
            .await
            .unwrap();

        client
            .update_document(
                "geo",
                &id,
                json!({"properties": {"title": "U"}, "links": [3]}),
            )
            .await
            .unwrap();

        assert_eq!(
            client.document("geo", &id),
            Some(json!({"properties": {"title": "U", "type": "dataset"}, "links": [3]}))
        );
    }

    #[tokio::test]
    async fn test_update_missing_document() {
        let client = InMemoryIndexClient::new();
        client.create_index("geo", None).await.unwrap();

        let err = client
            .update_document("geo", "nope", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::RequestFailed { status: 404, .. }));

        let err = client
            .update_document("other", "nope", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::IndexNotFound { .. }));
    }

    #[tokio::test]
    async fn test_blocked_index_rejects_writes() {
        let client = InMemoryIndexClient::new();
        client.block_writes("collections");

        let err = client
            .index_document("collections", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::RequestFailed { status: 403, .. }));
        assert!(client.documents("collections").is_empty());

        let ops = client.operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], IndexOperation::IndexDocument { id: None, .. }));
    }

    #[tokio::test]
    async fn test_blocked_updates_still_allow_indexing() {
        let client = InMemoryIndexClient::new();
        client.block_updates("geo");

        let id = client.index_document("geo", json!({"n": 1})).await.unwrap();
        let err = client
            .update_document("geo", &id, json!({"n": 2}))
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::RequestFailed { status: 403, .. }));
        assert_eq!(client.document("geo", &id), Some(json!({"n": 1})));
    }
}
