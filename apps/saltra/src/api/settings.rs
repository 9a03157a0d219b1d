use crate::client::{ApiClient, RequestOptions};
use crate::errors::ApiError;
use crate::models::UserProfile;

pub const USER_PROFILE: &str = "/settings/profile";

impl ApiClient {
    /// GET /settings/profile
    pub async fn user_profile(&self) -> Result<UserProfile, ApiError> {
        self.request(USER_PROFILE, RequestOptions::new()).await
    }
}
