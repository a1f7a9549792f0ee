//! Error types surfaced by the request runtime

use thiserror::Error;

/// Transport-level failure: connection, TLS, protocol.
#[derive(Error, Debug)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// A value could not be serialized, or a response body could not be
/// mapped onto its declared type.
#[derive(Error, Debug)]
#[error("serialization error: {0}")]
pub struct SerializationError(pub String);

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        SerializationError(err.to_string())
    }
}

/// Errors returned from an executed request. Always handed back to
/// the immediate caller of the generated method; the runtime never
/// retries or swallows them.
#[derive(Error, Debug)]
pub enum RequestError {
    /// A path parameter's value has no plain text rendering
    #[error("path parameter '{name}' is not representable as text")]
    InvalidPathParameter { name: String },

    /// The service answered with a non-success status code. Carries
    /// the message registered for the code (or a generic fallback)
    /// and, when a model was registered, the decoded response body.
    #[error("request failed with status {status}: {message}")]
    Failed {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
