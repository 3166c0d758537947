//! Core persistence traits.
//!
//! - [`Backend`] - What callers persist metadata records through
//! - [`IndexClient`] - The search engine operations backends are built on
//!
//! ```text
//! caller ── Backend::setup / Backend::save ──> ElasticsearchBackend<C>
//!                                                   │
//!                                                   └── C: IndexClient
//!                                                         ├── EsIndexClient
//!                                                         └── InMemoryIndexClient
//! ```

mod backend;
mod client;

pub use backend::{Backend, BackendKind};
pub use client::IndexClient;
