//! Router construction for the zip code service.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::require_bearer;
use crate::handlers;
use crate::state::AppState;

/// Build the full axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Directory routes, guarded when an API token is configured
    let protected = Router::new()
        .route("/api/zipcode/:zipcode/", get(handlers::zipcode_detail))
        .route("/api/top_zipcodes/", post(handlers::top_zipcodes))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    let public = Router::new()
        .route("/oidc/callback", get(handlers::oidc_callback))
        .route("/health", get(handlers::health));

    public
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
