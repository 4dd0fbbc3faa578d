//! Authorization header values for the discovery API.

use async_trait::async_trait;

/// Supplies the `authorization` header value for discovery requests.
///
/// Returning `Ok(None)` sends the request without the header.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn authorization(&self) -> anyhow::Result<Option<String>>;
}

/// A fixed header value, e.g. the placeholder accepted by a local emulator.
#[derive(Clone, Debug)]
pub struct StaticCredential(String);

impl StaticCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The placeholder credential the local emulator accepts.
    pub fn placeholder() -> Self {
        Self::new(crate::constants::PLACEHOLDER_AUTHORIZATION)
    }
}

#[async_trait]
impl CredentialProvider for StaticCredential {
    async fn authorization(&self) -> anyhow::Result<Option<String>> {
        Ok(Some(self.0.clone()))
    }
}

/// Sends no authorization header.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCredential;

#[async_trait]
impl CredentialProvider for NoCredential {
    async fn authorization(&self) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_placeholder_credential() {
        let value = StaticCredential::placeholder().authorization().await.unwrap();
        assert!(value.unwrap().starts_with("AWS4-HMAC-SHA256 Credential=test/"));
    }

    #[tokio::test]
    async fn test_no_credential() {
        assert_eq!(NoCredential.authorization().await.unwrap(), None);
    }
}
