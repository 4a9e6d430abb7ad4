//! HTTP client for the user service, the source of truth for usernames.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("User service unavailable: {0}")]
    Transport(reqwest::Error),
    #[error("User service returned {0}")]
    Status(reqwest::StatusCode),
    #[error("Invalid user service response: {0}")]
    Decode(reqwest::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub role: String,
}

#[derive(Clone)]
pub struct UserDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl UserDirectory {
    pub fn new(base_url: impl Into<String>) -> Self {
        UserDirectory {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// One round trip per call, no retry and no caching.
    #[tracing::instrument(name = "get user from directory", skip(self))]
    pub async fn get_user(&self, user_id: i64) -> Result<User, ClientError> {
        let url = format!("{}/api/users/{}", self.base_url, user_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        response.json::<User>().await.map_err(ClientError::Decode)
    }
}
