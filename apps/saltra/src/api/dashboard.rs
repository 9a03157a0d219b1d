use crate::client::{ApiClient, RequestOptions};
use crate::errors::ApiError;
use crate::models::DashboardStats;

pub const DASHBOARD_STATS: &str = "/dashboard/stats";

impl ApiClient {
    /// GET /dashboard/stats
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.request(DASHBOARD_STATS, RequestOptions::new()).await
    }
}
