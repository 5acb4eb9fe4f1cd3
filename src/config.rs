pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";
pub const DEFAULT_API_VERSION: &str = "v20.0";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub access_token: String,
    /// Ad account id without the `act_` prefix.
    pub ad_account_id: String,
    pub app_secret: Option<String>, // Enables appsecret_proof when present
    pub graph_base_url: String,
    pub api_version: String,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: parse_port(&std::env::var("PORT").unwrap_or_else(|_| "5000".to_string()))?,
            access_token: std::env::var("META_ACCESS_TOKEN")
                .map_err(|_| anyhow::anyhow!("META_ACCESS_TOKEN environment variable required"))
                .and_then(|token| {
                    if token.trim().is_empty() {
                        anyhow::bail!("META_ACCESS_TOKEN cannot be empty");
                    }
                    Ok(token)
                })?,
            ad_account_id: std::env::var("META_AD_ACCOUNT_ID")
                .map_err(|_| anyhow::anyhow!("META_AD_ACCOUNT_ID environment variable required"))
                .and_then(|id| normalize_account_id(&id))?,
            app_secret: std::env::var("META_APP_SECRET")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            graph_base_url: std::env::var("META_GRAPH_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| validate_base_url(&url))
                .transpose()?
                .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.to_string()),
            api_version: std::env::var("META_API_VERSION")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            request_timeout_secs: parse_timeout_secs(
                &std::env::var("META_REQUEST_TIMEOUT_SECS").unwrap_or_else(|_| "30".to_string()),
            )?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Graph API: {}/{}", config.graph_base_url, config.api_version);
        tracing::debug!("Ad account: act_{}", config.ad_account_id);
        if config.app_secret.is_some() {
            tracing::info!("App secret configured, requests will carry appsecret_proof");
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Strips an optional `act_` prefix and checks the remainder is a bare numeric id.
pub fn normalize_account_id(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    let id = trimmed.strip_prefix("act_").unwrap_or(trimmed);

    if id.is_empty() {
        anyhow::bail!("META_AD_ACCOUNT_ID cannot be empty");
    }
    if !id.chars().all(|c| c.is_ascii_digit()) {
        anyhow::bail!("META_AD_ACCOUNT_ID must be numeric (optionally prefixed with act_)");
    }

    Ok(id.to_string())
}

fn parse_port(raw: &str) -> anyhow::Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => anyhow::bail!("PORT must be a valid number between 1-65535"),
    }
}

/// A zero timeout would make every Graph API request fail immediately.
fn parse_timeout_secs(raw: &str) -> anyhow::Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => anyhow::bail!("META_REQUEST_TIMEOUT_SECS must be a positive whole number of seconds"),
    }
}

fn validate_base_url(raw: &str) -> anyhow::Result<String> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| anyhow::anyhow!("META_GRAPH_BASE_URL is not a valid URL: {}", e))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("META_GRAPH_BASE_URL must start with http:// or https://");
    }

    Ok(raw.trim_end_matches('/').to_string())
}
