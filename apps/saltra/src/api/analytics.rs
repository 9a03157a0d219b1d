use crate::client::{ApiClient, RequestOptions};
use crate::errors::ApiError;
use crate::models::AnalyticsData;

pub const ANALYTICS: &str = "/analytics";

impl ApiClient {
    /// GET /analytics
    pub async fn analytics(&self) -> Result<AnalyticsData, ApiError> {
        self.request(ANALYTICS, RequestOptions::new()).await
    }
}
