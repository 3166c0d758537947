//! Core types for the persistence layer.
//!
//! - [`MetadataRecord`] - A discovery metadata record with its links
//! - [`HostingEnvironment`], [`HostingUrls`] - Where rewritten collection links point
//! - [`SaveOutcome`] - What a save wrote
//!
//! # Example
//!
//! ```
//! use gdc_persistence::types::{HostingEnvironment, HostingUrls, collection_href};
//!
//! let urls = HostingUrls::new("https://ewc.example.org", "https://aws.example.org");
//! let environment: HostingEnvironment = "1".parse().unwrap();
//!
//! assert_eq!(
//!     collection_href(urls.base_url(environment), "abc"),
//!     "https://ewc.example.org/abc"
//! );
//! ```

mod environment;
mod record;

pub use environment::{HostingEnvironment, HostingUrls};

pub use record::{
    BACK_REFERENCE_FIELD, COLLECTION_REL, LinkRetention, MetadataRecord, SaveOutcome,
    collection_document, collection_href, is_collection_link, rewritten_link,
};
