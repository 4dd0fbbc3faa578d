//! Configuration module
//!
//! Session settings read from the environment (and `.env`). The endpoint URLs
//! themselves are not here: they live in the key-value store.

use crate::constants::{LOCAL_DEV_BASE_URL, PLACEHOLDER_AUTHORIZATION};
use crate::rewrite::RewriteRule;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const HTTP_TIMEOUT_SECS: u64 = 60;
const STORE_PATH: &str = ".s3etl/config.json";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// `protocol//host` the session is opened at. `None` behaves like a local file.
    pub origin: Option<String>,
    pub local_base_url: String,
    pub rewrite_rules: Vec<RewriteRule>,
    /// Value of the discovery `authorization` header; `None` sends no header.
    pub authorization: Option<String>,
    pub store_path: PathBuf,
    pub http_timeout: Duration,
    pub discover_on_start: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: None,
            local_base_url: LOCAL_DEV_BASE_URL.to_string(),
            rewrite_rules: RewriteRule::defaults(),
            authorization: Some(PLACEHOLDER_AUTHORIZATION.to_string()),
            store_path: PathBuf::from(STORE_PATH),
            http_timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            discover_on_start: true,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let origin = lookup("S3ETL_ORIGIN")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let local_base_url = lookup("S3ETL_LOCAL_BASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.local_base_url);

        let rewrite_rules = match lookup("S3ETL_BASE_URL_REWRITES") {
            Some(rules) => RewriteRule::parse_list(&rules)?,
            None => defaults.rewrite_rules,
        };

        // An explicitly empty value disables the header.
        let authorization = match lookup("S3ETL_AUTHORIZATION") {
            Some(value) if value.trim().is_empty() => None,
            Some(value) => Some(value),
            None => defaults.authorization,
        };

        let store_path = lookup("S3ETL_STORE_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.store_path);

        let http_timeout_secs = match lookup("S3ETL_HTTP_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>().map_err(|e| {
                anyhow::anyhow!("S3ETL_HTTP_TIMEOUT_SECS must be a whole number: {}", e)
            })?,
            None => HTTP_TIMEOUT_SECS,
        };

        let discover_on_start = match lookup("S3ETL_DISCOVER_ON_START") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                anyhow::anyhow!("S3ETL_DISCOVER_ON_START must be true or false, got '{}'", value)
            })?,
            None => defaults.discover_on_start,
        };

        let config = Self {
            origin,
            local_base_url,
            rewrite_rules,
            authorization,
            store_path,
            http_timeout: Duration::from_secs(http_timeout_secs),
            discover_on_start,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.http_timeout.is_zero() {
            return Err(anyhow::anyhow!("S3ETL_HTTP_TIMEOUT_SECS must be greater than 0"));
        }
        if !self.local_base_url.starts_with("http://") && !self.local_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "S3ETL_LOCAL_BASE_URL must be an http(s) URL, got '{}'",
                self.local_base_url
            ));
        }
        Ok(())
    }

    /// Base URL of the discovery API for this session.
    pub fn discovery_base_url(&self) -> String {
        crate::rewrite::resolve_base_url(
            self.origin.as_deref(),
            &self.local_base_url,
            &self.rewrite_rules,
        )
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<ClientConfig, anyhow::Error> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config.origin, None);
        assert_eq!(config.discovery_base_url(), "http://localhost:4566");
        assert_eq!(config.authorization.as_deref(), Some(PLACEHOLDER_AUTHORIZATION));
        assert_eq!(config.store_path, PathBuf::from(".s3etl/config.json"));
        assert_eq!(config.http_timeout, Duration::from_secs(60));
        assert!(config.discover_on_start);
    }

    #[test]
    fn test_origin_goes_through_rewrites() {
        let config = from_vars(&[(
            "S3ETL_ORIGIN",
            "http://webapp.s3-website.localhost.localstack.cloud:4566",
        )])
        .unwrap();
        assert_eq!(
            config.discovery_base_url(),
            "http://localhost.localstack.cloud:4566"
        );
    }

    #[test]
    fn test_custom_rewrites_replace_defaults() {
        let config = from_vars(&[
            ("S3ETL_ORIGIN", "https://static.example.com"),
            ("S3ETL_BASE_URL_REWRITES", "://static.=>://api."),
        ])
        .unwrap();
        assert_eq!(config.discovery_base_url(), "https://api.example.com");
    }

    #[test]
    fn test_empty_authorization_disables_header() {
        let config = from_vars(&[("S3ETL_AUTHORIZATION", "")]).unwrap();
        assert_eq!(config.authorization, None);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(from_vars(&[("S3ETL_HTTP_TIMEOUT_SECS", "soon")]).is_err());
        assert!(from_vars(&[("S3ETL_HTTP_TIMEOUT_SECS", "0")]).is_err());
        assert!(from_vars(&[("S3ETL_DISCOVER_ON_START", "maybe")]).is_err());
        assert!(from_vars(&[("S3ETL_LOCAL_BASE_URL", "localhost:4566")]).is_err());
        assert!(from_vars(&[("S3ETL_BASE_URL_REWRITES", "no-arrow")]).is_err());
    }

    #[test]
    fn test_discover_on_start_flag() {
        let config = from_vars(&[("S3ETL_DISCOVER_ON_START", "off")]).unwrap();
        assert!(!config.discover_on_start);
    }
}
