//! HTTP client for the s3etl pipeline.
//!
//! Provides a thin reqwest wrapper with status checking and JSON decoding,
//! and the three flows built on it: endpoint discovery, presigned upload, and
//! file listing. [`Session`] wires them together with a store and a notifier.

pub mod discovery;
pub mod error;
pub mod listing;
pub mod messages;
pub mod session;
pub mod upload;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use discovery::EndpointResolver;
pub use error::{ClientError, ClientResult};
pub use listing::{ListFlow, RefreshOutcome};
pub use session::{ConfigAction, Session};
pub use upload::{strip_fake_path, UploadFile, UploadFlow, UploadOutcome};

/// Shared HTTP plumbing for every flow. Cheap to clone.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { client })
    }

    /// GET `url` and return the body as text. `authorization` is sent as the
    /// `authorization` header when present.
    pub async fn get_text(&self, url: &str, authorization: Option<&str>) -> ClientResult<String> {
        let mut request = self.client.get(url);
        if let Some(value) = authorization {
            request = request.header("authorization", value);
        }

        let response = request.send().await.map_err(|source| ClientError::Request {
            url: url.to_string(),
            source,
        })?;
        let response = check_status(url, response).await?;

        response.text().await.map_err(|source| ClientError::Request {
            url: url.to_string(),
            source,
        })
    }

    /// GET `url` and deserialize the JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        let body = self.get_text(url, None).await?;
        decode(url, &body)
    }

    /// POST a multipart form. Any 2xx counts as success; the body is ignored.
    pub async fn post_multipart(&self, url: &str, form: reqwest::multipart::Form) -> ClientResult<()> {
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.to_string(),
                source,
            })?;

        check_status(url, response).await?;
        Ok(())
    }
}

/// Parse `body` as JSON, naming `url` in the error.
pub(crate) fn decode<T: DeserializeOwned>(url: &str, body: &str) -> ClientResult<T> {
    serde_json::from_str(body).map_err(|source| ClientError::Decode {
        url: url.to_string(),
        source,
    })
}

async fn check_status(url: &str, response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ClientError::Status {
        url: url.to_string(),
        status,
        body,
    })
}
