//! Error types for Taleo API operations.

use thiserror::Error;

/// Errors that can occur during Taleo API operations.
#[derive(Debug, Error)]
pub enum TaleoError {
    /// Configuration is missing or incomplete.
    #[error("Taleo configuration required: {0}")]
    ConfigMissing(String),

    /// The response envelope reported `status.success == false`.
    #[error("Taleo API error: {detail}")]
    ApiError {
        detail: serde_json::Value,
        status_code: Option<u16>,
    },

    /// Login was rejected, or the session is no longer valid.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// A required attribute is absent from a decoded payload.
    #[error("{kind} is missing required field '{field}'")]
    MissingField {
        kind: &'static str,
        field: String,
    },

    /// An attribute is present but does not decode into the requested type.
    #[error("{kind} field '{field}' has an unexpected type: {source}")]
    InvalidField {
        kind: &'static str,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// A declared relationship has no URL on this resource.
    #[error("{kind} has no '{name}' relationship available")]
    MissingRelationship {
        kind: &'static str,
        name: String,
    },

    /// The relationship name is not declared for this resource type.
    #[error("{kind} does not declare a relationship named '{name}'")]
    UnknownRelationship {
        kind: &'static str,
        name: String,
    },

    /// A to-one accessor was used on a to-many relationship or vice versa.
    #[error("{kind} relationship '{name}' is not a to-{expected} relationship")]
    CardinalityMismatch {
        kind: &'static str,
        name: &'static str,
        expected: &'static str,
    },

    /// A resource was converted into a typed entity of another kind.
    #[error("expected a {expected} resource, found {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A download was requested but no download URL is present.
    #[error("{kind} {id} is not available for download")]
    DownloadUnavailable { kind: &'static str, id: String },

    /// The server answered with a non-success status and no JSON envelope.
    #[error("Unexpected HTTP status {status_code}: {body}")]
    UnexpectedStatus { status_code: u16, body: String },

    /// The envelope decoded but its payload does not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// HTTP transport error (connection failure, timeout, body read failure).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Writing downloaded content failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl TaleoError {
    /// Returns true for network, timeout and malformed-body failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpError(_)
                | Self::ParseError(_)
                | Self::UrlError(_)
                | Self::MalformedResponse(_)
                | Self::UnexpectedStatus { .. }
        )
    }

    /// Returns true if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::HttpError(e) if e.is_timeout())
    }

    /// The envelope `detail` of an API error, if this is one.
    pub fn detail(&self) -> Option<&serde_json::Value> {
        match self {
            Self::ApiError { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

/// Result type alias for Taleo operations.
pub type Result<T> = core::result::Result<T, TaleoError>;
