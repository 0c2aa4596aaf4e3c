//! Shared handler state.

use std::sync::Arc;
use std::time::Instant;

use zipcode_core::QueryService;

use crate::oidc::TokenExchanger;

/// State cloned into every handler.
///
/// The directory inside `query` is loaded once before the router is built
/// and only ever read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub query: QueryService,
    pub exchanger: Option<Arc<dyn TokenExchanger>>,
    pub api_token: Option<Arc<str>>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(query: QueryService) -> Self {
        Self {
            query,
            exchanger: None,
            api_token: None,
            started_at: Instant::now(),
        }
    }

    pub fn with_exchanger(mut self, exchanger: Arc<dyn TokenExchanger>) -> Self {
        self.exchanger = Some(exchanger);
        self
    }

    /// Require `Authorization: Bearer <token>` on the directory routes
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Arc::from(token.into()));
        self
    }
}
