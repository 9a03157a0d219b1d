use reqwest::header::HeaderMap;
use serde::Serialize;

use crate::client::{ApiClient, RequestOptions};
use crate::errors::ApiError;
use crate::leads::{LeadListSchema, LeadModel, LeadSource, LeadStatus};

pub const LEADS: &str = "/leads";
const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Filters and paging understood by the backend's lead list route.
/// Unset fields are not sent; an empty query fetches the default page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
}

impl LeadQuery {
    fn apply(&self, mut options: RequestOptions) -> RequestOptions {
        let numbers = [("skip", self.skip), ("limit", self.limit)];
        for (key, value) in numbers {
            if let Some(value) = value {
                options = options.query(key, value);
            }
        }

        let texts = [
            ("first_name", self.first_name.as_deref()),
            ("last_name", self.last_name.as_deref()),
            ("email", self.email.as_deref()),
            ("status", self.status.as_ref().map(LeadStatus::as_str)),
            ("source", self.source.as_ref().map(LeadSource::as_str)),
            ("company", self.company.as_deref()),
            ("job_title", self.job_title.as_deref()),
            ("phone", self.phone.as_deref()),
        ];
        for (key, value) in texts {
            if let Some(value) = value {
                options = options.query(key, value);
            }
        }
        options
    }
}

/// One page of leads plus the backend's total match count, when it reports one.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeadPage {
    pub leads: Vec<LeadModel>,
    pub total_count: Option<u64>,
}

impl ApiClient {
    /// GET /leads. Never served from cache.
    pub async fn all_leads(&self) -> Result<Vec<LeadModel>, ApiError> {
        Ok(self.leads_page(&LeadQuery::default()).await?.leads)
    }

    /// GET /leads with filters. Never served from cache.
    pub async fn leads_page(&self, query: &LeadQuery) -> Result<LeadPage, ApiError> {
        let options = query.apply(RequestOptions::new().no_store());
        let (list, headers): (LeadListSchema, HeaderMap) =
            self.request_with_headers(LEADS, options).await?;

        Ok(LeadPage {
            leads: list.leads,
            total_count: total_count(&headers),
        })
    }

    /// GET /leads/{id}: the lead with its full interaction history. Never served from cache.
    pub async fn lead_details(&self, lead_id: &str) -> Result<LeadModel, ApiError> {
        let endpoint = lead_endpoint(lead_id)?;
        self.request(&endpoint, RequestOptions::new().no_store()).await
    }
}

fn lead_endpoint(lead_id: &str) -> Result<String, ApiError> {
    let id = lead_id.trim();
    if id.is_empty() {
        return Err(ApiError::InvalidRequest("lead id is empty".to_string()));
    }
    if id.contains(['/', '\\', '?', '#']) {
        return Err(ApiError::InvalidRequest(format!(
            "lead id '{id}' contains reserved URL characters"
        )));
    }
    // URL parsing collapses `.` and `..` (also percent-encoded) into the parent route.
    let decoded_dots = id.to_ascii_lowercase().replace("%2e", ".");
    if decoded_dots == "." || decoded_dots == ".." {
        return Err(ApiError::InvalidRequest(format!(
            "lead id '{id}' is a relative path segment"
        )));
    }
    Ok(format!("{LEADS}/{id}"))
}

fn total_count(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
