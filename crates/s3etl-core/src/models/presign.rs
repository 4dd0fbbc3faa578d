use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upload credential returned by the presign service.
///
/// `fields` keeps the order the service sent them in; every field goes into
/// the multipart body ahead of the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignedPost {
    pub url: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl PresignedPost {
    /// Form fields as `(name, value)` text pairs.
    ///
    /// String values are sent verbatim, anything else as its JSON text.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(name, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), text)
            })
            .collect()
    }
}
