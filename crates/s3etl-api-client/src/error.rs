//! Errors raised by the HTTP flows.

use s3etl_core::StoreError;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to create HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Failed to send request to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Discovery response for '{function}' has no FunctionUrlConfigs entry")]
    MalformedDiscovery { function: String },

    #[error("Failed to discover the '{function}' endpoint: {source}")]
    Discovery {
        function: String,
        #[source]
        source: Box<ClientError>,
    },

    #[error("Failed to get pre-signed upload credentials: {0}")]
    Presign(#[source] Box<ClientError>),

    #[error("Upload to object storage failed: {0}")]
    Upload(#[source] Box<ClientError>),

    #[error("Failed to load file list: {0}")]
    List(#[source] Box<ClientError>),

    #[error("Credential provider failed: {0}")]
    Credentials(String),

    #[error("Failed to read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("An upload is already in progress")]
    Busy,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// HTTP status of the innermost failed response, if any.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Discovery { source, .. } => source.status(),
            ClientError::Presign(inner) | ClientError::Upload(inner) | ClientError::List(inner) => {
                inner.status()
            }
            _ => None,
        }
    }
}
