//! s3etl Core Library
//!
//! Domain models, the endpoint configuration store, and the small capability
//! traits (storage, notifications, credentials, submit control) shared by the
//! API client and the CLI.

pub mod config;
pub mod constants;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod notify;
pub mod rewrite;
pub mod store;
pub mod tables;
pub mod upload_state;

// Re-export commonly used types
pub use config::ClientConfig;
pub use credentials::{CredentialProvider, NoCredential, StaticCredential};
pub use endpoints::EndpointConfig;
pub use error::{StoreError, StoreResult};
pub use models::{
    FileRecord, FunctionUrlConfig, FunctionUrlsResponse, OriginalObject, PresignedPost,
    ProcessedFile, RawFile,
};
pub use notify::{Notifier, RecordingNotifier};
pub use rewrite::{resolve_base_url, RewriteRule};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use tables::{FileRow, FileTables};
pub use upload_state::{
    NoopSubmitControl, RecordingSubmitControl, SubmitControl, UploadStage, UploadState,
};
