use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::handlers::{self, AppState};

/// Largest accepted request body. Only the status endpoints take a body at all.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the relay's HTTP surface.
///
/// CORS is permissive because the dashboard calls the relay straight from the browser.
pub fn build_router(state: Arc<AppState>) -> Router {
    let relay_routes = Router::new()
        // Listings
        .route("/campaigns", get(handlers::list_campaigns))
        .route("/adsets", get(handlers::list_ad_sets))
        .route("/adsets/insights", get(handlers::list_ad_set_insights))
        // Campaign status
        .route("/campaigns/:id/pause", post(handlers::pause_campaign))
        .route("/campaigns/:id/resume", post(handlers::resume_campaign))
        .route("/campaigns/:id/status", post(handlers::set_campaign_status))
        // Ad set status
        .route("/adsets/:id/pause", post(handlers::pause_ad_set))
        .route("/adsets/:id/resume", post(handlers::resume_ad_set))
        .route("/adsets/:id/status", post(handlers::set_ad_set_status))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(relay_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
