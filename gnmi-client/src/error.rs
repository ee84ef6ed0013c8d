use thiserror::Error;

/// Error type for gNMI client operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("RPC failed: {0}")]
    Rpc(#[from] tonic::Status),

    #[error("Invalid request metadata: {0}")]
    Metadata(#[from] tonic::metadata::errors::InvalidMetadataValue),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Target returned no value for {path}")]
    EmptyResponse { path: String },

    #[error("Target returned a non-JSON value for {path}")]
    NotJson { path: String },
}

/// Result type alias using the gNMI client's Error.
pub type Result<T> = std::result::Result<T, Error>;
