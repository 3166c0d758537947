//! Index provisioning tests.
//!
//! Run against the in-memory index client; no Elasticsearch instance required.

mod common;

use gdc_persistence::backends::elasticsearch::schema::primary_index_body;
use gdc_persistence::backends::memory::IndexOperation;
use gdc_persistence::core::{Backend, IndexClient};
use gdc_persistence::error::{ProvisioningError, StorageError};
use gdc_persistence::types::HostingEnvironment;
use serde_json::json;

use common::*;

#[tokio::test]
async fn test_setup_creates_both_indices() {
    let ctx = TestContext::new();

    ctx.backend.setup().await.unwrap();

    assert!(ctx.client.has_index(PRIMARY_INDEX));
    assert!(ctx.client.has_index(COLLECTION_INDEX));
    assert_eq!(ctx.client.index_body(PRIMARY_INDEX), Some(primary_index_body()));
    assert_eq!(ctx.client.index_body(COLLECTION_INDEX), None);
}

#[tokio::test]
async fn test_setup_on_fresh_cluster_deletes_nothing() {
    let ctx = TestContext::new();

    ctx.backend.setup().await.unwrap();

    let ops = ctx.client.operations();
    assert_eq!(
        ops,
        vec![
            IndexOperation::Exists {
                index: PRIMARY_INDEX.to_string()
            },
            IndexOperation::CreateIndex {
                index: PRIMARY_INDEX.to_string(),
                body: Some(primary_index_body()),
            },
            IndexOperation::CreateIndex {
                index: COLLECTION_INDEX.to_string(),
                body: None,
            },
        ]
    );
}

#[tokio::test]
async fn test_setup_recreates_existing_indices() {
    let ctx = TestContext::new();
    ctx.backend.setup().await.unwrap();

    let outcome = ctx
        .backend
        .save(collection_and_self_record(), HostingEnvironment::Ewc)
        .await
        .unwrap();
    assert_eq!(ctx.client.documents(PRIMARY_INDEX).len(), 1);
    assert_eq!(ctx.client.documents(COLLECTION_INDEX).len(), 1);

    ctx.backend.setup().await.unwrap();

    assert!(ctx.client.document(PRIMARY_INDEX, &outcome.id).is_none());
    assert!(ctx.client.documents(PRIMARY_INDEX).is_empty());
    assert!(ctx.client.documents(COLLECTION_INDEX).is_empty());
    assert_eq!(ctx.client.index_body(PRIMARY_INDEX), Some(primary_index_body()));
    assert_eq!(ctx.client.index_body(COLLECTION_INDEX), None);

    let deletes: Vec<_> = ctx
        .client
        .operations()
        .into_iter()
        .filter_map(|op| match op {
            IndexOperation::DeleteIndex { index } => Some(index),
            _ => None,
        })
        .collect();
    assert_eq!(deletes, vec![PRIMARY_INDEX, COLLECTION_INDEX]);
}

#[tokio::test]
async fn test_setup_tolerates_missing_collection_index() {
    let ctx = TestContext::new();
    ctx.client
        .create_index(PRIMARY_INDEX, Some(json!({"mappings": {}})))
        .await
        .unwrap();

    ctx.backend.setup().await.unwrap();

    assert_eq!(ctx.client.index_body(PRIMARY_INDEX), Some(primary_index_body()));
    assert!(ctx.client.has_index(COLLECTION_INDEX));
}

#[tokio::test]
async fn test_setup_fails_when_stale_collection_index_remains() {
    let ctx = TestContext::new();
    ctx.client.create_index(COLLECTION_INDEX, None).await.unwrap();

    let err = ctx.backend.setup().await.unwrap_err();

    assert!(matches!(
        err,
        StorageError::Provisioning(ProvisioningError::CreateFailed { ref index, .. })
            if index == COLLECTION_INDEX
    ));
    // The primary index was created before the failure
    assert!(ctx.client.has_index(PRIMARY_INDEX));
}
