//! API client: the single point of contact between the dashboard and the backend.
//!
//! Every resource function in `crate::api` goes through `ApiClient::request`.
//! No other module may touch the network directly.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::config::Config;
use crate::errors::ApiError;

pub mod transport;

use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Whether a response may be served from a cache on the way to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    #[default]
    Default,
    /// Always hit the backend; sent as `Cache-Control: no-store`.
    NoStore,
}

/// Per-call overrides. Headers set here win over the defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<Bytes>,
    pub cache: CachePolicy,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn no_store(mut self) -> Self {
        self.cache = CachePolicy::NoStore;
        self
    }
}

/// Typed client for the leads backend. Cheap to clone; holds no mutable state.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Builds a client talking HTTP to `config.api_url`.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::with_transport(&config.api_url, Arc::new(transport)))
    }

    /// Builds a client over any transport. `base_url` is used as given apart
    /// from trailing slashes; validate it with `config::normalize_api_url` first.
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generic request helper: one network call, non-2xx is an error, body parsed as JSON.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let (value, _headers) = self.request_with_headers(endpoint, options).await?;
        Ok(value)
    }

    /// Same as `request`, but also hands back the response headers.
    pub async fn request_with_headers<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<(T, HeaderMap), ApiError> {
        let raw = format!("{}{}", self.base_url, endpoint);

        let result = self.execute(endpoint, &raw, options).await;
        if let Err(e) = &result {
            error!(url = %raw, error = %e, "Error fetching data");
        }
        result
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        raw: &str,
        options: RequestOptions,
    ) -> Result<(T, HeaderMap), ApiError> {
        let request = build_request(raw, options)?;
        let url = request.url.to_string();

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let ApiResponse {
            status,
            headers,
            body,
            ..
        } = check_status(endpoint, &url, response)?;

        let value = serde_json::from_slice(&body).map_err(|source| ApiError::Parse {
            url: url.clone(),
            source,
        })?;

        debug!(url = %url, status, bytes = body.len(), "Fetched {endpoint}");

        Ok((value, headers))
    }
}

fn build_request(raw: &str, options: RequestOptions) -> Result<ApiRequest, ApiError> {
    let mut url =
        Url::parse(raw).map_err(|e| ApiError::InvalidRequest(format!("bad URL '{raw}': {e}")))?;
    if !options.query.is_empty() {
        url.query_pairs_mut().extend_pairs(options.query.iter());
    }

    Ok(ApiRequest {
        method: options.method.unwrap_or(Method::GET),
        url,
        headers: merge_headers(default_headers(), options.headers),
        body: options.body,
        cache: options.cache,
    })
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Caller headers replace defaults of the same (case-insensitive) name.
fn merge_headers(mut defaults: HeaderMap, overrides: HeaderMap) -> HeaderMap {
    let mut last_name: Option<HeaderName> = None;
    for (name, value) in overrides {
        // `None` means another value for the previous header name
        let name = match name {
            Some(name) => {
                defaults.remove(&name);
                last_name = Some(name.clone());
                name
            }
            None => match &last_name {
                Some(name) => name.clone(),
                None => continue,
            },
        };
        defaults.append(name, value);
    }
    defaults
}

fn check_status(endpoint: &str, url: &str, response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::Http {
        endpoint: endpoint.to_string(),
        url: url.to_string(),
        status: response.status,
        status_text: response.status_text,
    })
}
