//! Assertion helpers for saved records.

use serde_json::Value;

use gdc_persistence::backends::memory::InMemoryIndexClient;
use gdc_persistence::types::{BACK_REFERENCE_FIELD, SaveOutcome};

/// Asserts that a saved record's links are exactly its rewritten collection
/// links, in order, pointing at `base_url`.
///
/// # Panics
///
/// Panics if any link is not a collection link, carries a back-reference, or
/// does not point at its collection document.
pub fn assert_rewritten_collections(outcome: &SaveOutcome, base_url: &str) {
    let links = outcome.record.links();
    assert_eq!(
        links.len(),
        outcome.collection_ids.len(),
        "Link count mismatch: expected {}, got {}",
        outcome.collection_ids.len(),
        links.len()
    );

    for (link, collection_id) in links.iter().zip(&outcome.collection_ids) {
        assert_rewritten_link(link, base_url, collection_id);
    }
}

/// Asserts that a single link was rewritten to `{base_url}/{collection_id}`.
pub fn assert_rewritten_link(link: &Value, base_url: &str, collection_id: &str) {
    assert_eq!(link["rel"], "collection", "Not a collection link: {}", link);
    assert_eq!(
        link["href"],
        format!("{}/{}", base_url, collection_id),
        "href mismatch for {}",
        link
    );
    assert!(
        link.get(BACK_REFERENCE_FIELD).is_none(),
        "Back-reference leaked into record link: {}",
        link
    );
}

/// Asserts that the client received no document writes.
pub fn assert_no_document_writes(client: &InMemoryIndexClient) {
    let writes: Vec<_> = client
        .operations()
        .into_iter()
        .filter(|op| op.is_document_write())
        .collect();
    assert!(writes.is_empty(), "Unexpected document writes: {:?}", writes);
}
