//! Typed records for the Graph API payloads the relay consumes.
//!
//! The Graph API sends most numbers as decimal strings and omits fields that
//! are unset (an ad set with a lifetime budget has no `daily_budget`, a row
//! with no conversions has no `actions`). All of that defaulting happens here,
//! while decoding, so the rest of the crate only sees plain numbers.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// One page of an edge listing (`/act_{id}/campaigns`, `/act_{id}/adsets`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct GraphPage<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    /// Absolute URL of the next page; absent on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCampaign {
    pub id: String,
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawAdSet {
    pub id: String,
    pub name: String,
    pub status: String,
    pub campaign_id: String,

    /// Minor currency units (cents).
    #[serde(default, deserialize_with = "minor_units")]
    pub daily_budget: i64,
    #[serde(default, deserialize_with = "minor_units")]
    pub lifetime_budget: i64,
    #[serde(default, deserialize_with = "minor_units")]
    pub budget_remaining: i64,
}

/// An `{action_type, value}` entry from `actions` / `action_values`.
///
/// `value` stays undecoded: only the entry a metric is actually read from gets
/// parsed, so a malformed value on an unrelated action type is harmless.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionValue {
    #[serde(default)]
    pub action_type: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl ActionValue {
    pub fn new(action_type: &str, value: f64) -> Self {
        Self {
            action_type: Some(action_type.to_string()),
            value: Some(Value::from(value)),
        }
    }

    /// Numeric value of the entry. Absent or null counts as 0; `None` means not a number.
    pub fn numeric_value(&self) -> Option<f64> {
        match &self.value {
            None | Some(Value::Null) => Some(0.0),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            Some(_) => None,
        }
    }
}

/// One row of `/act_{id}/insights?level=adset`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawInsightRow {
    #[serde(default)]
    pub adset_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub spend: f64,
    #[serde(default)]
    pub actions: Option<Vec<ActionValue>>,
    #[serde(default)]
    pub action_values: Option<Vec<ActionValue>>,
}

/// Body of a non-2xx Graph API response.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorEnvelope {
    pub error: GraphErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorBody {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub fbtrace_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

/// Accepts `5000`, `"5000"` or null/absent (→ 0). Fractional minor units are rejected.
fn minor_units<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(0),
        Some(NumberOrString::Int(n)) => Ok(n),
        Some(NumberOrString::Float(f)) if f.fract() == 0.0 => Ok(f as i64),
        Some(NumberOrString::Float(f)) => Err(de::Error::custom(format!(
            "expected whole minor units, got {}",
            f
        ))),
        Some(NumberOrString::Str(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("invalid minor-unit amount: {:?}", s))),
    }
}

/// Accepts `10.5`, `"10.5"` or null/absent (→ 0.0).
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(NumberOrString::Int(n)) => Ok(n as f64),
        Some(NumberOrString::Float(f)) => Ok(f),
        Some(NumberOrString::Str(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid numeric value: {:?}", s))),
    }
}
