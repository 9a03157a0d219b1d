use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::{Client, Method, StatusCode};
use url::Url;

use super::CachePolicy;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A fully resolved request, ready to go on the wire.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    pub cache: CachePolicy,
}

/// Raw response as seen by the request helper, before status checks or parsing.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// Canonical reason phrase for `status`, or the numeric code when the status
    /// has none. The phrase the server actually sent is not preserved.
    pub status_text: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The network seam. `ApiClient` sends every request through exactly one
/// `send` call; implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, BoxError>;
}

/// reqwest-backed transport used outside of tests.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, BoxError> {
        let mut headers = request.headers;
        if request.cache == CachePolicy::NoStore {
            headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
            headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        }

        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text: status_text(status),
            headers,
            body,
        })
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}
