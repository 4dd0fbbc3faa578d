//! Fixed names shared by the flows.

/// Store key holding the presign endpoint URL.
pub const PRESIGN_URL_KEY: &str = "functionUrlPresign";

/// Store key holding the list endpoint URL.
pub const LIST_URL_KEY: &str = "functionUrlList";

/// Logical function name of the presign service in the discovery API.
pub const PRESIGN_FUNCTION: &str = "presign";

/// Logical function name of the list service in the discovery API.
pub const LIST_FUNCTION: &str = "list";

/// API version segment of the discovery path.
pub const DISCOVERY_API_VERSION: &str = "2021-10-31";

/// Base URL used when the session has no network origin.
pub const LOCAL_DEV_BASE_URL: &str = "http://localhost:4566";

/// Multipart field name carrying the file content.
pub const FILE_FIELD: &str = "file";

/// Placeholder authorization value accepted by the local emulator.
pub const PLACEHOLDER_AUTHORIZATION: &str =
    "AWS4-HMAC-SHA256 Credential=test/20231004/us-east-1/lambda/aws4_request, ...";
