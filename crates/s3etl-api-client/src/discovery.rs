//! Endpoint Resolver: looks up the live presign and list URLs from the
//! function-URL discovery API and persists them.

use crate::error::{ClientError, ClientResult};
use crate::{decode, messages, HttpClient};
use s3etl_core::constants::{DISCOVERY_API_VERSION, LIST_FUNCTION, PRESIGN_FUNCTION};
use s3etl_core::{
    ClientConfig, CredentialProvider, EndpointConfig, FunctionUrlsResponse, KeyValueStore,
    NoCredential, Notifier, StaticCredential,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct EndpointResolver {
    http: HttpClient,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for EndpointResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointResolver")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl EndpointResolver {
    pub fn new(
        http: HttpClient,
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Resolver for the base URL and authorization value of `config`.
    pub fn from_config(http: HttpClient, config: &ClientConfig) -> Self {
        let credentials: Arc<dyn CredentialProvider> = match &config.authorization {
            Some(value) => Arc::new(StaticCredential::new(value.clone())),
            None => Arc::new(NoCredential),
        };
        Self::new(http, config.discovery_base_url(), credentials)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Discovery URL for the logical function `name`.
    pub fn function_urls_endpoint(&self, name: &str) -> String {
        format!(
            "{}/{}/functions/{}/urls",
            self.base_url,
            DISCOVERY_API_VERSION,
            urlencoding::encode(name)
        )
    }

    /// Current invocation URL of `function`.
    pub async fn lookup(&self, function: &str) -> ClientResult<String> {
        let url = self.function_urls_endpoint(function);
        let authorization = self
            .credentials
            .authorization()
            .await
            .map_err(|e| ClientError::Credentials(format!("{:#}", e)))?;

        tracing::debug!(function, url = %url, "Looking up function URL");

        // Body may arrive as text/plain.
        let body = self.http.get_text(&url, authorization.as_deref()).await?;
        let response: FunctionUrlsResponse = decode(&url, &body)?;

        response
            .first_url()
            .map(str::to_string)
            .ok_or_else(|| ClientError::MalformedDiscovery {
                function: function.to_string(),
            })
    }

    /// Look up presign then list, writing each into `endpoints` and `store`
    /// as soon as it resolves. The list lookup only starts once presign is done.
    pub async fn resolve(
        &self,
        endpoints: &mut EndpointConfig,
        store: &mut dyn KeyValueStore,
        notifier: &dyn Notifier,
    ) -> ClientResult<()> {
        let presign_url = self
            .lookup(PRESIGN_FUNCTION)
            .await
            .map_err(|e| discovery_failed(PRESIGN_FUNCTION, e, notifier))?;
        endpoints.set_presign(presign_url, store)?;

        let list_url = self
            .lookup(LIST_FUNCTION)
            .await
            .map_err(|e| discovery_failed(LIST_FUNCTION, e, notifier))?;
        endpoints.set_list(list_url, store)?;

        tracing::info!(
            presign_url = %endpoints.presign_url,
            list_url = %endpoints.list_url,
            "Function URL configurations loaded"
        );
        notifier.notify(messages::CONFIG_LOADED);
        Ok(())
    }
}

fn discovery_failed(function: &str, error: ClientError, notifier: &dyn Notifier) -> ClientError {
    tracing::error!(function, error = %error, "Function URL lookup failed");
    notifier.notify(&messages::discovery_failed(function));
    ClientError::Discovery {
        function: function.to_string(),
        source: Box::new(error),
    }
}
