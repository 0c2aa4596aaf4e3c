//! HTTP endpoint handlers.
//!
//! Endpoints:
//! - GET  /api/zipcode/:zipcode/ — Entry whose fields include the token
//! - POST /api/top_zipcodes/    — Three entries whose city best matches `city_name`
//! - GET  /oidc/callback         — Authorization code to token exchange
//! - GET  /health                — Liveness and directory size

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use zipcode_core::Entry;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `POST /api/top_zipcodes/`
#[derive(Debug, Default, Deserialize)]
pub struct TopZipcodesRequest {
    /// Free-text city name; absent or null ranks against the empty string
    #[serde(default)]
    pub city_name: Option<String>,
}

/// Query string of `GET /oidc/callback`
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub entries: usize,
    pub uptime_seconds: u64,
}

/// GET /api/zipcode/:zipcode/
pub async fn zipcode_detail(
    State(state): State<AppState>,
    Path(zipcode): Path<String>,
) -> Result<Json<Entry>, ApiError> {
    let entry = state
        .query
        .lookup_by_token(&zipcode)
        .ok_or(ApiError::NotFound)?;

    info!(zipcode = %zipcode, "Zip code details retrieved successfully.");
    Ok(Json(entry.clone()))
}

/// POST /api/top_zipcodes/
pub async fn top_zipcodes(
    State(state): State<AppState>,
    Json(request): Json<TopZipcodesRequest>,
) -> Json<Vec<Entry>> {
    let city_name = request.city_name.unwrap_or_default();

    let ranked: Vec<Entry> = state
        .query
        .rank_by_name(&city_name)
        .into_iter()
        .cloned()
        .collect();

    info!(
        city_name = %city_name,
        results = ranked.len(),
        "Top zip codes retrieved successfully."
    );
    Json(ranked)
}

/// GET /oidc/callback?code=...
pub async fn oidc_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<Value>, ApiError> {
    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or(ApiError::MissingCode)?;

    let exchanger = state
        .exchanger
        .as_ref()
        .ok_or(ApiError::ExchangeUnavailable)?;

    match exchanger.exchange(&code).await {
        Ok(tokens) => {
            info!("Authorization code exchanged");
            Ok(Json(tokens))
        }
        Err(err) => {
            warn!(error = %err, "Token exchange failed");
            Err(err.into())
        }
    }
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        entries: state.query.directory().len(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
