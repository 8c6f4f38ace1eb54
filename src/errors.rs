use thiserror::Error;

use crate::catalog::EntityType;

/// Failures of an external catalog or record source.
///
/// None of these are retried; they abort the current request and the
/// transport decides what to show the user.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The call did not complete within the configured timeout.
    #[error("{what} timed out after {seconds}s")]
    Timeout { what: String, seconds: u64 },

    /// Wrapper around IO errors (missing collection file, permissions, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around serde_json errors for malformed documents.
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport failure or non-success status from the wiki.
    #[error("http error: {0}")]
    Http(String),

    /// Content was reachable but could not be understood.
    #[error("malformed content: {0}")]
    Malformed(String),

    /// A name listed by the catalog has no backing record.
    #[error("no {kind} record named '{name}'")]
    MissingRecord { kind: EntityType, name: String },

    /// The source does not serve this entity type.
    #[error("source does not provide {0} records")]
    Unsupported(EntityType),
}

/// Errors surfaced by the resolver.
///
/// Ambiguity and absence are not errors; see [`crate::resolver::Resolution`].
#[derive(Debug, Error)]
pub enum ResolveError {
    /// An entity-type key outside the configured set.
    #[error("invalid entity type: {0}")]
    InvalidEntityType(String),

    /// A callback key that is not `entityType/entityName` or
    /// `section/entityType/entityName`.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Upstream failure while listing a catalog or fetching a record.
    #[error(transparent)]
    Source(#[from] SourceError),
}
