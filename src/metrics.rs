//! Derivation of per-ad-set performance numbers from raw insight rows.

use thiserror::Error;

use crate::graph_models::{ActionValue, RawInsightRow};
use crate::models::AdSetInsight;

/// Action type counted as a conversion in both `actions` and `action_values`.
pub const PURCHASE_ACTION: &str = "purchase";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("non-numeric value for action type {action_type}: {value}")]
    InvalidValue { action_type: String, value: String },
}

/// Returns the value of the first entry whose `action_type` matches, or 0.
///
/// Later entries with the same `action_type` are ignored, and only the matched
/// entry's value is parsed.
pub fn extract_metric(
    items: Option<&[ActionValue]>,
    action_type: &str,
) -> Result<f64, MetricError> {
    let Some(item) = items
        .unwrap_or_default()
        .iter()
        .find(|item| item.action_type.as_deref() == Some(action_type))
    else {
        return Ok(0.0);
    };

    item.numeric_value().ok_or_else(|| MetricError::InvalidValue {
        action_type: action_type.to_string(),
        value: item
            .value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_default(),
    })
}

/// Rounds to two decimal places, half to even on the exact binary value.
///
/// Goes through `{:.2}` formatting, which rounds the float's exact decimal
/// expansion, so `0.125` becomes `0.12` and `0.375` becomes `0.38`.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(0.0)
}

/// Converts minor currency units (cents) to major units.
pub fn minor_to_major(minor: i64) -> f64 {
    minor as f64 / 100.0
}

/// Return on ad spend; 0 when nothing was spent.
pub fn compute_roas(revenue: f64, spend: f64) -> f64 {
    if spend > 0.0 {
        revenue / spend
    } else {
        0.0
    }
}

pub fn derive_insight(row: &RawInsightRow) -> Result<AdSetInsight, MetricError> {
    let spend = row.spend;
    let purchases = extract_metric(row.actions.as_deref(), PURCHASE_ACTION)?;
    let revenue = extract_metric(row.action_values.as_deref(), PURCHASE_ACTION)?;
    let roas = compute_roas(revenue, spend);

    Ok(AdSetInsight {
        adset_id: row.adset_id.clone(),
        spend: round2(spend),
        // `as` truncates toward zero (and maps NaN to 0)
        purchases: purchases.trunc() as i64,
        revenue: round2(revenue),
        roas: round2(roas),
    })
}
