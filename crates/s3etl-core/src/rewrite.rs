//! Base URL derivation for the discovery API.
//!
//! Static website hosting puts the page at a host such as
//! `webapp.s3-website.localhost.localstack.cloud`, while the discovery API
//! lives at the bare host. A list of textual rewrite rules strips those
//! conventions from the origin.

use std::fmt;
use std::str::FromStr;

/// Separator between the two halves of a rule in its textual form.
const RULE_ARROW: &str = "=>";

/// Replace the first occurrence of `from` with `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub from: String,
    pub to: String,
}

impl RewriteRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Rules for the bucket-website hosting convention, in application order.
    pub fn defaults() -> Vec<RewriteRule> {
        vec![
            RewriteRule::new("://webapp.s3.", "://"),
            RewriteRule::new("://webapp.s3-website.", "://"),
        ]
    }

    pub fn apply(&self, input: &str) -> String {
        if self.from.is_empty() {
            return input.to_string();
        }
        input.replacen(&self.from, &self.to, 1)
    }

    /// Parse a comma-separated list of `from=>to` rules.
    pub fn parse_list(input: &str) -> Result<Vec<RewriteRule>, anyhow::Error> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(RewriteRule::from_str)
            .collect()
    }
}

impl FromStr for RewriteRule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once(RULE_ARROW)
            .ok_or_else(|| anyhow::anyhow!("Invalid rewrite rule '{}': expected FROM=>TO", s))?;
        if from.is_empty() {
            return Err(anyhow::anyhow!(
                "Invalid rewrite rule '{}': FROM must not be empty",
                s
            ));
        }
        Ok(RewriteRule::new(from, to))
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.from, RULE_ARROW, self.to)
    }
}

/// Whether `origin` denotes a page with no network origin.
fn is_local_file(origin: &str) -> bool {
    origin.is_empty() || origin.contains("file://") || origin.starts_with("file:")
}

/// Base URL of the discovery API for a session opened at `origin`.
///
/// `origin` is `protocol//host` of the page. Without one (or for a local file)
/// `local_base` is used. Every rule is then applied once, in order.
pub fn resolve_base_url(origin: Option<&str>, local_base: &str, rules: &[RewriteRule]) -> String {
    let origin = origin.map(str::trim).unwrap_or_default();
    let base = if is_local_file(origin) {
        local_base
    } else {
        origin
    };

    rules
        .iter()
        .fold(base.trim_end_matches('/').to_string(), |url, rule| {
            rule.apply(&url)
        })
}
