use crate::ads_client::{AdsPlatform, DEFAULT_DATE_PRESET};
use crate::errors::{AppError, ResultExt};
use crate::metrics::derive_insight;
use crate::models::*;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Advertising platform client, built once at startup and never mutated.
    pub platform: Arc<dyn AdsPlatform>,
}

/// Health check endpoint. Does not call the platform.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "meta-ads-relay",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /campaigns
///
/// Lists the account's campaigns as `{id, name, status}` in platform order.
pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CampaignView>>, AppError> {
    tracing::info!("GET /campaigns");

    let campaigns: Vec<CampaignView> = state
        .platform
        .list_campaigns()
        .await
        .context("Listing campaigns")?
        .into_iter()
        .map(CampaignView::from)
        .collect();

    tracing::info!("Returning {} campaign(s)", campaigns.len());
    Ok(Json(campaigns))
}

/// GET /adsets
///
/// Lists the account's ad sets with budgets converted to major currency units.
pub async fn list_ad_sets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AdSetView>>, AppError> {
    tracing::info!("GET /adsets");

    let ad_sets: Vec<AdSetView> = state
        .platform
        .list_ad_sets()
        .await
        .context("Listing ad sets")?
        .into_iter()
        .map(AdSetView::from)
        .collect();

    tracing::info!("Returning {} ad set(s)", ad_sets.len());
    Ok(Json(ad_sets))
}

/// GET /adsets/insights
///
/// Per-ad-set spend, purchases, revenue and ROAS. Defaults to today's numbers;
/// `?date_preset=` is forwarded unvalidated when given.
pub async fn list_ad_set_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InsightsQueryParams>,
) -> Result<Json<Vec<AdSetInsight>>, AppError> {
    let date_preset = params
        .date_preset
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or(DEFAULT_DATE_PRESET);
    tracing::info!("GET /adsets/insights - date_preset: {}", date_preset);

    let rows = state
        .platform
        .list_ad_set_insights(date_preset)
        .await
        .with_context(|| format!("Fetching ad set insights ({})", date_preset))?;

    let insights = rows
        .iter()
        .map(derive_insight)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Deriving ad set insights ({})", date_preset))?;

    Ok(Json(insights))
}

/// POST /campaigns/:id/pause
pub async fn pause_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    apply_status(&state, EntityKind::Campaign, &id, STATUS_PAUSED).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /campaigns/:id/resume
pub async fn resume_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    apply_status(&state, EntityKind::Campaign, &id, STATUS_ACTIVE).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /adsets/:id/pause
pub async fn pause_ad_set(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    apply_status(&state, EntityKind::AdSet, &id, STATUS_PAUSED).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /adsets/:id/resume
pub async fn resume_ad_set(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    apply_status(&state, EntityKind::AdSet, &id, STATUS_ACTIVE).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /campaigns/:id/status
///
/// Body `{"status": "..."}`. The status string is passed to the platform
/// without local validation; the platform decides whether it is acceptable.
pub async fn set_campaign_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, AppError> {
    let Json(body) = payload?;
    apply_status(&state, EntityKind::Campaign, &id, &body.status).await?;
    Ok(Json(OkResponse { ok: true }))
}

/// POST /adsets/:id/status
///
/// Same contract as [`set_campaign_status`], for ad sets.
pub async fn set_ad_set_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, AppError> {
    let Json(body) = payload?;
    apply_status(&state, EntityKind::AdSet, &id, &body.status).await?;
    Ok(Json(OkResponse { ok: true }))
}

/// Issues exactly one update call; errors are returned, never retried.
async fn apply_status(
    state: &AppState,
    kind: EntityKind,
    id: &str,
    status: &str,
) -> Result<(), AppError> {
    tracing::info!("POST status {} -> {} for {}", id, status, kind);

    state
        .platform
        .update_status(kind, id, status)
        .await
        .with_context(|| format!("Setting {} {} to {}", kind, id, status))
}
