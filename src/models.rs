use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph_models::{RawAdSet, RawCampaign};
use crate::metrics::minor_to_major;

pub const STATUS_PAUSED: &str = "PAUSED";
pub const STATUS_ACTIVE: &str = "ACTIVE";

/// The two entity types whose status the relay can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Campaign,
    AdSet,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Campaign => write!(f, "campaign"),
            EntityKind::AdSet => write!(f, "ad set"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignView {
    pub id: String,
    pub name: String,
    pub status: String,
}

impl From<RawCampaign> for CampaignView {
    fn from(raw: RawCampaign) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            status: raw.status,
        }
    }
}

/// Ad set with budgets in major currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdSetView {
    pub id: String,
    pub name: String,
    pub status: String,
    pub campaign_id: String,
    pub daily_budget: f64,
    pub lifetime_budget: f64,
    pub budget_remaining: f64,
}

impl From<RawAdSet> for AdSetView {
    fn from(raw: RawAdSet) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            status: raw.status,
            campaign_id: raw.campaign_id,
            daily_budget: minor_to_major(raw.daily_budget),
            lifetime_budget: minor_to_major(raw.lifetime_budget),
            budget_remaining: minor_to_major(raw.budget_remaining),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdSetInsight {
    pub adset_id: Option<String>,
    pub spend: f64,
    pub purchases: i64,
    pub revenue: f64,
    pub roas: f64,
}

/// Body of `POST /{campaigns,adsets}/:id/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct InsightsQueryParams {
    pub date_preset: Option<String>,
}

/// Response of the pause/resume endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Response of the set-status endpoints.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
