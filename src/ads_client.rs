use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Url;
use serde::de::DeserializeOwned;
use sha2::Sha256;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::graph_models::{
    GraphErrorEnvelope, GraphPage, RawAdSet, RawCampaign, RawInsightRow,
};
use crate::models::EntityKind;

pub const CAMPAIGN_FIELDS: &str = "id,name,status";
pub const AD_SET_FIELDS: &str =
    "id,name,status,campaign_id,daily_budget,lifetime_budget,budget_remaining";
pub const INSIGHT_FIELDS: &str = "adset_id,spend,actions,action_values,purchase_roas";
pub const INSIGHT_LEVEL: &str = "adset";
pub const DEFAULT_DATE_PRESET: &str = "today";
/// Upper bound on pages followed for a single listing.
pub const MAX_PAGES: usize = 500;

#[derive(Error, Debug)]
pub enum GraphApiError {
    #[error("Graph API request failed: {0}")]
    RequestFailed(String),
    #[error("Graph API returned {status}: {message} (code {code:?})")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },
    #[error("Invalid Graph API response: {0}")]
    InvalidResponse(String),
}

/// Read and update operations the relay needs from the advertising platform.
///
/// Handlers only talk to this trait, so tests can swap in a double.
#[async_trait]
pub trait AdsPlatform: Send + Sync {
    /// All campaigns of the bound ad account, in platform order.
    async fn list_campaigns(&self) -> Result<Vec<RawCampaign>, GraphApiError>;

    /// All ad sets of the bound ad account, in platform order.
    async fn list_ad_sets(&self) -> Result<Vec<RawAdSet>, GraphApiError>;

    /// Insight rows at ad-set level for the given date preset (e.g. `today`).
    async fn list_ad_set_insights(
        &self,
        date_preset: &str,
    ) -> Result<Vec<RawInsightRow>, GraphApiError>;

    /// Sets the `status` field of a campaign or ad set. The value is forwarded as-is.
    async fn update_status(
        &self,
        kind: EntityKind,
        id: &str,
        status: &str,
    ) -> Result<(), GraphApiError>;
}

/// Graph API client bound to a single ad account.
#[derive(Clone)]
pub struct MetaGraphClient {
    client: reqwest::Client,
    api_root: String,
    account_id: String,
    access_token: String,
    appsecret_proof: Option<String>,
}

impl MetaGraphClient {
    pub fn new(config: &Config) -> Result<Self, GraphApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                GraphApiError::RequestFailed(format!("Failed to create Graph API client: {}", e))
            })?;

        Ok(Self {
            client,
            api_root: format!(
                "{}/{}",
                config.graph_base_url.trim_end_matches('/'),
                config.api_version
            ),
            account_id: config.ad_account_id.clone(),
            access_token: config.access_token.clone(),
            appsecret_proof: config
                .app_secret
                .as_deref()
                .map(|secret| appsecret_proof(secret, &config.access_token)),
        })
    }

    fn auth_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("access_token", self.access_token.clone())];
        if let Some(proof) = &self.appsecret_proof {
            params.push(("appsecret_proof", proof.clone()));
        }
        params
    }

    /// Fetches every page of `/act_{account}/{edge}`, following `paging.next`.
    ///
    /// Stops when a `next` link repeats one already followed, and fails once
    /// more than [`MAX_PAGES`] pages would be requested.
    async fn fetch_all<T: DeserializeOwned>(
        &self,
        edge: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, GraphApiError> {
        let url = format!("{}/act_{}/{}", self.api_root, self.account_id, edge);
        tracing::info!("Fetching {} for ad account act_{}", edge, self.account_id);
        tracing::debug!("Graph API URL: {} params={:?} access_token=[REDACTED]", url, params);

        let mut request = self
            .client
            .get(&url)
            .query(&self.auth_params())
            .query(params);
        let mut records = Vec::new();
        let mut pages = 0usize;
        let mut seen = HashSet::new();

        loop {
            let response = request
                .send()
                .await
                .map_err(|e| GraphApiError::RequestFailed(e.to_string()))?;
            let response = check_response(response).await?;

            let page: GraphPage<T> = response.json().await.map_err(|e| {
                GraphApiError::InvalidResponse(format!("Failed to parse {} page: {}", edge, e))
            })?;
            pages += 1;
            records.extend(page.data);

            // `next` already carries every query parameter, credentials included
            let Some(next) = page.paging.and_then(|p| p.next) else {
                break;
            };
            if !seen.insert(next.clone()) {
                tracing::warn!(
                    "Graph API repeated a {} page link, stopping after {} page(s)",
                    edge,
                    pages
                );
                break;
            }
            if pages >= MAX_PAGES {
                return Err(GraphApiError::InvalidResponse(format!(
                    "{} listing exceeded {} pages",
                    edge, MAX_PAGES
                )));
            }
            request = self.client.get(next);
        }

        tracing::debug!("Fetched {} {} record(s) over {} page(s)", records.len(), edge, pages);
        Ok(records)
    }
}

#[async_trait]
impl AdsPlatform for MetaGraphClient {
    async fn list_campaigns(&self) -> Result<Vec<RawCampaign>, GraphApiError> {
        self.fetch_all("campaigns", &[("fields", CAMPAIGN_FIELDS)])
            .await
    }

    async fn list_ad_sets(&self) -> Result<Vec<RawAdSet>, GraphApiError> {
        self.fetch_all("adsets", &[("fields", AD_SET_FIELDS)]).await
    }

    async fn list_ad_set_insights(
        &self,
        date_preset: &str,
    ) -> Result<Vec<RawInsightRow>, GraphApiError> {
        self.fetch_all(
            "insights",
            &[
                ("fields", INSIGHT_FIELDS),
                ("level", INSIGHT_LEVEL),
                ("date_preset", date_preset),
            ],
        )
        .await
    }

    async fn update_status(
        &self,
        kind: EntityKind,
        id: &str,
        status: &str,
    ) -> Result<(), GraphApiError> {
        // Push the id as a path segment so it is escaped, never spliced raw into the URL
        let mut url = Url::parse(&self.api_root)
            .map_err(|e| GraphApiError::RequestFailed(format!("Failed to build URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| GraphApiError::RequestFailed("Graph API URL cannot be a base".into()))?
            .push(id);

        tracing::info!("Updating {} {} status to {}", kind, id, status);

        let response = self
            .client
            .post(url)
            .query(&self.auth_params())
            .query(&[("status", status)])
            .send()
            .await
            .map_err(|e| GraphApiError::RequestFailed(e.to_string()))?;
        check_response(response).await?;

        tracing::info!("✓ {} {} status set to {}", kind, id, status);
        Ok(())
    }
}

/// Turns a non-2xx response into `GraphApiError::Api`, reading the Graph error envelope when present.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, GraphApiError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    match serde_json::from_str::<GraphErrorEnvelope>(&error_text) {
        Ok(envelope) => {
            tracing::warn!(
                "Graph API error {}: type={:?} code={:?} fbtrace_id={:?}",
                status,
                envelope.error.kind,
                envelope.error.code,
                envelope.error.fbtrace_id
            );
            Err(GraphApiError::Api {
                status: status.as_u16(),
                code: envelope.error.code,
                message: envelope.error.message,
            })
        }
        Err(_) => Err(GraphApiError::Api {
            status: status.as_u16(),
            code: None,
            message: error_text,
        }),
    }
}

/// `hex(HMAC-SHA256(key = app_secret, message = access_token))`.
pub fn appsecret_proof(app_secret: &str, access_token: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(app_secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(access_token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            port: 5000,
            access_token: "token".to_string(),
            ad_account_id: "123".to_string(),
            app_secret: None,
            graph_base_url: "https://graph.example.com/".to_string(),
            api_version: "v20.0".to_string(),
            request_timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = MetaGraphClient::new(&test_config()).unwrap();
        assert_eq!(client.api_root, "https://graph.example.com/v20.0");
        assert!(client.appsecret_proof.is_none());
    }

    #[test]
    fn test_auth_params_include_proof_when_secret_set() {
        let mut config = test_config();
        config.app_secret = Some("secret".to_string());

        let client = MetaGraphClient::new(&config).unwrap();
        let params = client.auth_params();

        assert_eq!(params[0], ("access_token", "token".to_string()));
        assert_eq!(params[1].0, "appsecret_proof");
        assert_eq!(params[1].1, appsecret_proof("secret", "token"));
    }

    #[test]
    fn test_appsecret_proof_known_vector() {
        // RFC 4231 test case 2
        assert_eq!(
            appsecret_proof("Jefe", "what do ya want for nothing?"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }
}
