//! Current user profile

use reqwest::Method;

use crate::client::ApiClient;
use crate::types::{UpdateProfileRequest, UserProfile};
use crate::Result;

impl ApiClient {
    pub async fn current_user(&self) -> Result<UserProfile> {
        let request = self.request(Method::GET, "/api/users/me");
        self.execute(request).await
    }

    pub async fn update_profile(&self, data: &UpdateProfileRequest) -> Result<UserProfile> {
        let request = self.request(Method::PUT, "/api/users/me").json(data);
        self.execute(request).await
    }
}
