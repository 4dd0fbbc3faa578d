//! Notification texts shown to the user.

pub const CONFIG_LOADED: &str = "Function URL configurations loaded";
pub const CONFIG_SAVED: &str = "Configuration saved";
pub const CONFIG_CLEARED: &str = "Configuration cleared";
pub const UNKNOWN_ACTION: &str = "Unknown action";

pub const PRESIGN_NOT_CONFIGURED: &str = "Please set the function URL of the presign endpoint";
pub const LIST_NOT_CONFIGURED: &str = "Please set the function URL of the list endpoint";

pub const PRESIGN_FAILED: &str = "error getting pre-signed URL. check the logs!";
pub const UPLOAD_SUCCEEDED: &str = "Upload succeeded";
pub const UPLOAD_FAILED: &str = "error! check the logs";
pub const LIST_FAILED: &str = "error loading file list. check the logs!";

pub fn discovery_failed(function: &str) -> String {
    format!("error loading function URL for {}. check the logs!", function)
}
