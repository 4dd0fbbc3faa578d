//! Wire models of the external services.
//!
//! Field names follow the JSON the services emit, so most structs rename
//! to PascalCase.

pub mod discovery;
pub mod file_record;
pub mod presign;

pub use discovery::{FunctionUrlConfig, FunctionUrlsResponse};
pub use file_record::{FileRecord, OriginalObject, ProcessedFile, RawFile};
pub use presign::PresignedPost;
