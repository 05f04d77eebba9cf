//! Configuration structures for Hetzner Cloud clients.
//!
//! [`HcloudConfig`] carries everything needed to reach the API: the endpoint, the
//! API token and the request timeout. It can be built in code, deserialized from
//! a configuration file, or read from the environment.

use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Production API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.hetzner.cloud/v1";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "HCLOUD_TOKEN";

/// Environment variable overriding the API endpoint.
pub const ENDPOINT_ENV: &str = "HCLOUD_ENDPOINT";

/// Configuration for a Hetzner Cloud client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HcloudConfig {
    /// API base URL
    #[validate(url)]
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API token, sent as a bearer token
    #[serde(skip_serializing, deserialize_with = "deserialize_secret")]
    pub token: SecretString,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Optional User-Agent override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl HcloudConfig {
    /// Create a configuration for the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::Config("API token must not be empty".to_string()));
        }

        let config = Self {
            endpoint: default_endpoint(),
            token: SecretString::from(token),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read the configuration from `HCLOUD_TOKEN` and, if set, `HCLOUD_ENDPOINT`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or the endpoint is invalid.
    pub fn from_env() -> Result<Self, Error> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| Error::Config(format!("{TOKEN_ENV} is not set")))?;
        let config = Self::new(token)?;

        match std::env::var(ENDPOINT_ENV) {
            Ok(endpoint) => config.with_endpoint(endpoint),
            Err(_) => Ok(config),
        }
    }

    /// Point the client at another endpoint (mock servers, proxies).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Result<Self, Error> {
        self.endpoint = endpoint.into();
        self.validate()?;
        Ok(self)
    }

    /// Set request timeout in seconds.
    ///
    /// Checked when a client is built from this configuration.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Override the User-Agent header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The raw token, for building the `Authorization` header.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Parse the endpoint URL.
    ///
    /// A trailing slash is added so relative paths join below `/v1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_endpoint(&self) -> Result<Url, Error> {
        parse_base_url(&self.endpoint)
    }
}

/// Parse a base URL, making sure it ends with a slash.
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed.
pub fn parse_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)
        .map_err(|e| Error::Config(format!("Invalid endpoint URL `{raw}`: {e}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
