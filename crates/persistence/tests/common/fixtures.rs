//! Test fixtures for persistence layer testing.
//!
//! This module provides predefined discovery metadata records, along with a
//! builder for creating custom ones.

use serde_json::{Value, json};

use gdc_persistence::types::MetadataRecord;

/// A metadata record fixture for testing.
#[derive(Debug, Clone)]
pub struct RecordFixture {
    /// Record identifier.
    pub id: String,
    /// Record title.
    pub title: String,
    /// Links in order, as (rel, href) pairs.
    pub links: Vec<(String, String)>,
}

impl RecordFixture {
    /// Creates a new record fixture with no links.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            title: format!("Dataset {}", id),
            id,
            links: vec![],
        }
    }

    /// Appends a link.
    pub fn with_link(mut self, rel: &str, href: &str) -> Self {
        self.links.push((rel.to_string(), href.to_string()));
        self
    }

    /// Appends a collection link.
    pub fn with_collection(self, href: &str) -> Self {
        self.with_link("collection", href)
    }

    /// Builds the record as JSON.
    pub fn to_json(&self) -> Value {
        let links: Vec<Value> = self
            .links
            .iter()
            .map(|(rel, href)| {
                json!({
                    "rel": rel,
                    "href": href,
                    "type": "application/json"
                })
            })
            .collect();

        json!({
            "id": self.id,
            "type": "Feature",
            "conformsTo": ["http://wis.wmo.int/spec/wcmp/2/conf/core"],
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-10.0, 40.0], [5.0, 40.0], [5.0, 55.0], [-10.0, 55.0], [-10.0, 40.0]]]
            },
            "properties": {
                "type": "dataset",
                "title": self.title,
                "description": "Surface observations",
                "wmo:topicHierarchy": "origin/a/wis2/fr-meteofrance/data/core/weather/surface-based-observations/synop",
                "wmo:dataPolicy": "core"
            },
            "links": links
        })
    }

    /// Builds the record.
    pub fn build(&self) -> MetadataRecord {
        MetadataRecord::from_value(self.to_json()).expect("fixture record is valid")
    }
}

/// A record with one collection link and one self link.
pub fn collection_and_self_record() -> MetadataRecord {
    MetadataRecord::from_value(json!({
        "links": [
            {"rel": "collection", "href": "orig1"},
            {"rel": "self", "href": "x"}
        ]
    }))
    .expect("fixture record is valid")
}

/// A record whose collection and other links are interleaved.
pub fn interleaved_record() -> MetadataRecord {
    RecordFixture::new("urn:wmo:md:fr-meteofrance:synop")
        .with_link("self", "https://example.org/self")
        .with_collection("https://example.org/c1")
        .with_link("alternate", "https://example.org/alt")
        .with_collection("https://example.org/c2")
        .with_collection("https://example.org/c3")
        .with_link("license", "https://example.org/license")
        .build()
}
