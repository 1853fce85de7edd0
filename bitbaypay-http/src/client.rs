//! Configuration for an HTTP-backed [`BitBayPay`] gateway.

use std::time::Duration;

use bitbaypay::constants::BASE_URL;
use bitbaypay::{BitBayPay, Credentials};

use crate::transport::HttpTransport;

/// A gateway client that talks to BitBayPay over `reqwest`.
pub type BitBayPayClient = BitBayPay<HttpTransport>;

/// Configuration for [`BitBayPayClient`].
pub struct ClientConfig {
    /// API root every method path is appended to. Must end with `/`.
    pub base_url: String,

    /// Per-request timeout. `None` leaves the client's own behavior in place.
    pub timeout: Option<Duration>,

    /// Optional pre-configured reqwest client.
    pub http_client: Option<reqwest::Client>,

    /// The API key pair.
    pub credentials: Credentials,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_owned(),
            timeout: None,
            http_client: None,
            credentials: Credentials::default(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("has_http_client", &self.http_client.is_some())
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration for the production API with `credentials`.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            ..Self::default()
        }
    }

    /// Sets the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replaces the API key pair.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Builds the gateway client.
    #[must_use]
    pub fn build(self) -> BitBayPayClient {
        let mut transport = self
            .http_client
            .map_or_else(HttpTransport::new, HttpTransport::with_client);
        if let Some(timeout) = self.timeout {
            transport = transport.with_timeout(timeout);
        }
        BitBayPay::new(transport, self.credentials).with_base_url(self.base_url)
    }
}
