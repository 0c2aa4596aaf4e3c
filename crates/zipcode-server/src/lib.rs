//! Zip Code Directory Service
//!
//! HTTP front end for the [`zipcode_core`] engine: exact zip code lookup,
//! top-three city ranking, and an OIDC authorization-code callback that
//! exchanges codes for tokens at the identity provider.
//!
//! ## Module Structure
//!
//! - `config` - command line and environment configuration
//! - `error` - start-up errors and HTTP error responses
//! - `state` - shared handler state
//! - `auth` - bearer token guard for the directory routes
//! - `handlers` - HTTP endpoint handlers
//! - `oidc` - token exchange adapter
//! - `router` - route table
//! - `telemetry` - tracing subscriber setup

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod oidc;
pub mod router;
pub mod state;
pub mod telemetry;

pub use config::ServerArgs;
pub use error::{ApiError, Error, Result};
pub use oidc::{ExchangeError, OidcConfig, OidcTokenClient, TokenExchanger};
pub use router::build_router;
pub use state::AppState;
