//! Error types for the Cytomine client.
//!
//! Every variant belongs to exactly one [`ErrorKind`]. Precondition, validation
//! and unsupported-operation errors are always raised locally, before any
//! network call. Remote errors are propagated unchanged from the transport.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Broad classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operation cannot produce a valid request in the current state.
    Precondition,
    /// A caller-supplied value was rejected against a static contract.
    Validation,
    /// The entity type deliberately does not implement the operation.
    Unsupported,
    /// The transport reported a failure or the server answered badly.
    Remote,
}

/// Errors that can occur during resource operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API error response from the server.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Invalid response format from the server.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// JSON (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The entity has no addressing key, so it cannot be fetched.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The operation requires a persisted entity.
    #[error("Cannot {operation} {entity}: the instance has not been saved")]
    NotPersisted {
        operation: &'static str,
        entity: &'static str,
    },

    /// The entity was deleted on the server through this instance.
    #[error("Cannot {operation} {entity}: the instance was deleted")]
    Deleted {
        operation: &'static str,
        entity: &'static str,
    },

    /// Required addressing fields are missing.
    #[error("Cannot resolve URI for {entity}: {reason}")]
    UnresolvedUri {
        entity: &'static str,
        reason: String,
    },

    /// No filter is set and the collection cannot be fetched unfiltered.
    #[error("A filter is required to fetch the {entity} collection")]
    FilterRequired { entity: &'static str },

    /// Requested page is outside the known page range.
    #[error("Page {page} is out of bounds{}", .pages.map(|p| format!(" ({p} pages)")).unwrap_or_default())]
    PageOutOfBounds { page: i64, pages: Option<u64> },

    /// Filter key not in the element type's allow-list.
    #[error("Invalid filter '{key}' for the {entity} collection")]
    InvalidFilter { key: String, entity: &'static str },

    /// Query parameter not declared by the element type.
    #[error("Unknown query parameter '{name}' for the {entity} collection")]
    UnknownParameter { name: String, entity: &'static str },

    /// Value pushed into a collection is not of its element type.
    #[error("Type mismatch: expected a {expected} model")]
    TypeMismatch { expected: &'static str },

    /// Domain association with a reference that is not persisted.
    #[error("Reference {entity} must be persisted (id and class) before association")]
    UnpersistedReference { entity: &'static str },

    /// Operation deliberately not implemented by the entity type.
    #[error("{operation} of {entity} not implemented")]
    Unsupported {
        operation: &'static str,
        entity: &'static str,
    },
}

impl ClientError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::HttpError(_)
            | Self::ApiError { .. }
            | Self::InvalidResponse(_)
            | Self::Serialization(_)
            | Self::InvalidUrl(_) => ErrorKind::Remote,
            Self::NotFound(_)
            | Self::NotPersisted { .. }
            | Self::Deleted { .. }
            | Self::UnresolvedUri { .. }
            | Self::FilterRequired { .. }
            | Self::PageOutOfBounds { .. } => ErrorKind::Precondition,
            Self::InvalidFilter { .. }
            | Self::UnknownParameter { .. }
            | Self::TypeMismatch { .. }
            | Self::UnpersistedReference { .. } => ErrorKind::Validation,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
        }
    }

    /// Check if this error was raised before any network call.
    pub fn is_local(&self) -> bool {
        self.kind() != ErrorKind::Remote
    }

    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
