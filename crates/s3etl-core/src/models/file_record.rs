use serde::{Deserialize, Serialize};

/// One entry of the list service response.
///
/// Either half may be missing: a file still being processed has only `Raw`,
/// and a processed file whose original was removed has only `Processed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "Raw", default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawFile>,
    #[serde(rename = "Processed", default, skip_serializing_if = "Option::is_none")]
    pub processed: Option<ProcessedFile>,
}

/// The file as uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawFile {
    pub name: String,
    pub original: OriginalObject,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalObject {
    #[serde(rename = "Size")]
    pub size: u64,
    #[serde(rename = "URL")]
    pub url: String,
}

/// Output of the transform stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedFile {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Size")]
    pub size: u64,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}
