use anyhow::{bail, Context, Result};
use url::Url;

/// Base URL used when `SALTRA_API_URL` is not set (local backend dev server).
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
/// Handed to `ApiClient::from_config`; nothing else reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_api_url(None)
    }

    /// Like `from_env`, but an explicit base URL replaces `SALTRA_API_URL`.
    /// The environment value is then never read, so a malformed one is not an error.
    pub fn from_env_with_api_url(api_url: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup_with_api_url(|key| std::env::var(key).ok(), api_url)
    }

    /// Builds a config from an arbitrary key lookup instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with_api_url(lookup, None)
    }

    pub fn from_lookup_with_api_url<F>(lookup: F, api_url: Option<&str>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = match api_url {
            Some(url) => url.to_string(),
            None => lookup("SALTRA_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        };

        Ok(Config {
            api_url: normalize_api_url(&api_url)?,
            request_timeout_secs: lookup("SALTRA_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .context("SALTRA_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Config pointing at an explicit base URL with default timeout and log level.
    pub fn with_api_url(api_url: &str) -> Result<Self> {
        Ok(Config {
            api_url: normalize_api_url(api_url)?,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            rust_log: "info".to_string(),
        })
    }
}

/// Validates an absolute http(s) base URL and strips trailing slashes so that
/// endpoint paths (which start with `/`) can be appended verbatim.
pub fn normalize_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let parsed =
        Url::parse(trimmed).with_context(|| format!("Invalid API base URL '{trimmed}'"))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("API base URL '{trimmed}' must use http or https");
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        bail!("API base URL '{trimmed}' must not carry a query string or fragment");
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
