//! Command line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::error::{Error, Result};
use crate::oidc::OidcConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "zipcode-server")]
#[command(about = "Zip code directory lookup and city ranking service")]
#[command(version)]
pub struct ServerArgs {
    /// Headerless seven-column zip code CSV
    #[arg(long, env = "ZIPCODE_DATASET", default_value = "zips.csv")]
    pub dataset: PathBuf,

    /// HTTP server port
    #[arg(short, long, env = "ZIPCODE_PORT", default_value = "8000")]
    pub port: u16,

    /// HTTP server address (overrides port)
    #[arg(short, long, env = "ZIPCODE_ADDRESS")]
    pub address: Option<String>,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Bearer token required on the directory routes; open when unset
    #[arg(long, env = "ZIPCODE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// OIDC provider token endpoint
    #[arg(long, env = "OIDC_OP_TOKEN_ENDPOINT")]
    pub oidc_token_endpoint: Option<String>,

    /// OIDC relying-party client id
    #[arg(long, env = "OIDC_RP_CLIENT_ID")]
    pub oidc_client_id: Option<String>,

    /// OIDC relying-party client secret
    #[arg(long, env = "OIDC_RP_CLIENT_SECRET", hide_env_values = true)]
    pub oidc_client_secret: Option<String>,

    /// Redirect URI registered with the OIDC provider
    #[arg(long, env = "REDIRECT_URL")]
    pub oidc_redirect_uri: Option<String>,
}

impl ServerArgs {
    /// Default tracing filter derived from `--log-level`
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        match &self.address {
            Some(address) => address.parse().map_err(|e| {
                Error::Config(format!("failed to parse address '{}': {}", address, e))
            }),
            None => format!("0.0.0.0:{}", self.port).parse().map_err(|e| {
                Error::Config(format!("failed to parse port {}: {}", self.port, e))
            }),
        }
    }

    /// Token exchange settings, present only when all four values are set
    pub fn oidc_config(&self) -> Option<OidcConfig> {
        Some(OidcConfig {
            token_endpoint: self.oidc_token_endpoint.clone()?,
            client_id: self.oidc_client_id.clone()?,
            client_secret: self.oidc_client_secret.clone()?,
            redirect_uri: self.oidc_redirect_uri.clone()?,
        })
    }
}
