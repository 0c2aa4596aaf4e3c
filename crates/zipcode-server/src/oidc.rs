//! OIDC authorization-code exchange.
//!
//! The callback handler only sees the [`TokenExchanger`] trait, so tests can
//! swap in a stub and never touch the network. [`OidcTokenClient`] is the
//! production implementation: a form-encoded POST to the provider's token
//! endpoint whose JSON answer is passed back untouched.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const EXCHANGE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The provider could not be reached, rejected the request, or answered
    /// with something that is not JSON. Carries the provider error text.
    #[error("{0}")]
    Upstream(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        ExchangeError::Upstream(err.to_string())
    }
}

/// Exchanges an authorization code for the provider's token response.
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    async fn exchange(&self, code: &str) -> Result<Value, ExchangeError>;
}

/// Relying-party settings for the token endpoint
#[derive(Debug, Clone)]
pub struct OidcConfig {
    pub token_endpoint: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// [`TokenExchanger`] backed by the provider's token endpoint.
pub struct OidcTokenClient {
    http: Client,
    config: OidcConfig,
}

impl OidcTokenClient {
    pub fn new(config: OidcConfig) -> Result<Self, ExchangeError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(EXCHANGE_TIMEOUT_SECS))
            .build()
            .map_err(|e| ExchangeError::Client(e.to_string()))?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl TokenExchanger for OidcTokenClient {
    async fn exchange(&self, code: &str) -> Result<Value, ExchangeError> {
        debug!(endpoint = %self.config.token_endpoint, "Exchanging authorization code");

        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.config.token_endpoint)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Value>().await?)
    }
}
