//! Search engine driver abstraction.
//!
//! [`IndexClient`] is the narrow set of index and document operations the
//! backends need from a search engine. Indices are addressed by name and
//! documents by the identifier the engine assigns when indexing them.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BackendError;

/// Index and document operations provided by a search engine driver.
#[async_trait]
pub trait IndexClient: Send + Sync + Debug {
    /// Returns true if the index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, BackendError>;

    /// Deletes an index. Deleting a missing index is not an error.
    async fn delete_index(&self, index: &str) -> Result<(), BackendError>;

    /// Creates an index, with settings and mappings if `body` is given.
    async fn create_index(&self, index: &str, body: Option<Value>) -> Result<(), BackendError>;

    /// Indexes a new document and returns the identifier assigned to it.
    async fn index_document(&self, index: &str, document: Value) -> Result<String, BackendError>;

    /// Updates an existing document with the fields of `document`.
    async fn update_document(
        &self,
        index: &str,
        id: &str,
        document: Value,
    ) -> Result<(), BackendError>;
}

#[async_trait]
impl<C: IndexClient + ?Sized> IndexClient for Arc<C> {
    async fn index_exists(&self, index: &str) -> Result<bool, BackendError> {
        (**self).index_exists(index).await
    }

    async fn delete_index(&self, index: &str) -> Result<(), BackendError> {
        (**self).delete_index(index).await
    }

    async fn create_index(&self, index: &str, body: Option<Value>) -> Result<(), BackendError> {
        (**self).create_index(index, body).await
    }

    async fn index_document(&self, index: &str, document: Value) -> Result<String, BackendError> {
        (**self).index_document(index, document).await
    }

    async fn update_document(
        &self,
        index: &str,
        id: &str,
        document: Value,
    ) -> Result<(), BackendError> {
        (**self).update_document(index, id, document).await
    }
}
