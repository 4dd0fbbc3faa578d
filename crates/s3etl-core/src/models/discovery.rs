use serde::{Deserialize, Serialize};

/// Body of `GET {base}/2021-10-31/functions/{name}/urls`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionUrlsResponse {
    #[serde(default)]
    pub function_url_configs: Vec<FunctionUrlConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionUrlConfig {
    pub function_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
}

impl FunctionUrlsResponse {
    /// URL of the first configuration, if the service returned any.
    pub fn first_url(&self) -> Option<&str> {
        self.function_url_configs
            .first()
            .map(|c| c.function_url.as_str())
    }
}
