//! Entry point of the library.

use crate::actions::ServerActionsEndpoint;
use crate::servers::ServersEndpoint;
use crate::Result;
use hcloud_core::client::{ClientConfig, HttpTransportBuilder, Transport};
use hcloud_core::config::HcloudConfig;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builder for [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    config: HcloudConfig,
    http_config: Option<ClientConfig>,
}

impl ClientBuilder {
    /// Start from an API token and the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        HcloudConfig::new(token).map(Self::from_config)
    }

    /// Start from an existing configuration.
    #[must_use]
    pub const fn from_config(config: HcloudConfig) -> Self {
        Self {
            config,
            http_config: None,
        }
    }

    /// Use another API endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Result<Self> {
        self.config = self.config.with_endpoint(endpoint)?;
        Ok(self)
    }

    /// Override the User-Agent header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(user_agent);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.config = self.config.with_timeout(seconds);
        self
    }

    /// Tune the HTTP connection pool; replaces the configured timeout.
    #[must_use]
    pub const fn with_http_config(mut self, http_config: ClientConfig) -> Self {
        self.http_config = Some(http_config);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn build(self) -> Result<Client> {
        let mut builder = HttpTransportBuilder::from_config(&self.config)?;
        if let Some(http_config) = self.http_config {
            builder = builder.with_http_config(http_config);
        }
        let transport = builder.build()?;
        debug!(endpoint = %transport.base_url(), "Created Hetzner Cloud client");
        Ok(Client::with_transport(Arc::new(transport)))
    }
}

/// Hetzner Cloud API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct Client {
    servers: ServersEndpoint,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client for the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or the HTTP client cannot be
    /// created.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(token)?.build()
    }

    /// Start building a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty.
    pub fn builder(token: impl Into<String>) -> Result<ClientBuilder> {
        ClientBuilder::new(token)
    }

    /// Create a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: HcloudConfig) -> Result<Self> {
        ClientBuilder::from_config(config).build()
    }

    /// Create a client from `HCLOUD_TOKEN` and `HCLOUD_ENDPOINT`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not set or the endpoint is invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_config(HcloudConfig::from_env()?)
    }

    /// Create a client on top of a custom transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            servers: ServersEndpoint::new(transport),
        }
    }

    /// Servers endpoint.
    #[must_use]
    pub fn servers(&self) -> &ServersEndpoint {
        &self.servers
    }

    /// Shortcut for `servers().actions()`.
    #[must_use]
    pub fn server_actions(&self) -> &ServerActionsEndpoint {
        self.servers.actions()
    }
}
