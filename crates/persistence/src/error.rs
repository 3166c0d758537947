//! Error types for the persistence layer.
//!
//! Errors are grouped by the phase that raises them: configuration at
//! construction time, provisioning during `setup`, usage and validation before
//! any write, and backend failures while talking to the search engine.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::fmt;

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Index provisioning errors
    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),

    /// Caller usage errors
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Record validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors raised while building a backend from its definitions.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The connection string is not a valid URL.
    #[error("invalid connection string '{connection}': {message}")]
    InvalidConnection { connection: String, message: String },

    /// The connection string has no index name in its path.
    #[error("connection string '{connection}' does not name an index")]
    MissingIndexName { connection: String },

    /// A required definition is missing or empty.
    #[error("missing required definition: {name}")]
    MissingDefinition { name: String },

    /// A hosting base URL is not a valid URL.
    #[error("invalid {environment} base URL '{url}': {message}")]
    InvalidHostingUrl {
        environment: String,
        url: String,
        message: String,
    },

    /// The collection index would share the primary index's name.
    #[error("collection index must differ from the primary index '{index}'")]
    IndexNameConflict { index: String },

    /// The requested backend kind is not known.
    #[error("unknown backend '{name}'")]
    UnknownBackend { name: String },
}

/// Errors raised while provisioning indices.
#[derive(Error, Debug)]
pub enum ProvisioningError {
    /// Checking whether an index exists failed.
    #[error("failed to check index {index}: {message}")]
    ExistsCheckFailed { index: String, message: String },

    /// Deleting an index failed.
    #[error("failed to delete index {index}: {message}")]
    DeleteFailed { index: String, message: String },

    /// Creating an index failed.
    #[error("failed to create index {index}: {message}")]
    CreateFailed { index: String, message: String },
}

/// Errors caused by how the caller invoked an operation.
#[derive(Error, Debug)]
pub enum UsageError {
    /// The hosting environment selection was not 1 or 2.
    #[error("invalid environment selection '{selection}': provide either value 1 or 2")]
    InvalidEnvironment { selection: String },
}

/// Errors related to record validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The record is not a JSON object.
    #[error("metadata record must be a JSON object, found {found}")]
    NotAnObject { found: String },

    /// The record has no `links` array.
    #[error("metadata record has no 'links' array")]
    MissingLinks,

    /// A link entry is malformed.
    #[error("invalid link at position {position}: {message}")]
    InvalidLink { position: usize, message: String },
}

/// The step of a save at which a backend request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStep {
    /// Indexing the record into the primary index.
    IndexRecord,
    /// Indexing a collection link into the collection index.
    IndexCollection,
    /// Updating the primary document with rewritten links.
    UpdateRecord,
}

impl fmt::Display for SaveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStep::IndexRecord => write!(f, "index-record"),
            SaveStep::IndexCollection => write!(f, "index-collection"),
            SaveStep::UpdateRecord => write!(f, "update-record"),
        }
    }
}

/// Errors originating from the search engine backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// A request kept timing out after all retries.
    #[error("request to {backend_name} timed out after {attempts} attempts")]
    Timeout {
        backend_name: String,
        attempts: u32,
    },

    /// The backend rejected a request.
    #[error("{backend_name} returned status {status}: {body}")]
    RequestFailed {
        backend_name: String,
        status: u16,
        body: String,
    },

    /// The index addressed by a request does not exist.
    #[error("index not found: {index}")]
    IndexNotFound { index: String },

    /// A save step failed; earlier steps were not rolled back.
    #[error("save failed at step {step}: {source}")]
    SaveFailed {
        step: SaveStep,
        /// Primary document id, if the record was already indexed.
        document_id: Option<String>,
        #[source]
        source: Box<BackendError>,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
