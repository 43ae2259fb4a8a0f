use super::AuthVerifier;
use crate::domain::error::{AppError, Result};
use crate::domain::user::AuthenticatedUser;
use crate::infrastructure::config::AuthConfig;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

/// Verifies credentials against the backend's `/auth/v1/user` endpoint.
pub struct RemoteAuthVerifier {
    client: reqwest::Client,
    user_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl RemoteAuthVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            user_url: user_endpoint(&config.project_url),
            anon_key: config.anon_key.clone(),
        }
    }
}

fn user_endpoint(project_url: &str) -> String {
    format!("{}/auth/v1/user", project_url.trim().trim_end_matches('/'))
}

fn unauthorized() -> AppError {
    AppError::Unauthorized("Unauthorized".to_string())
}

#[async_trait]
impl AuthVerifier for RemoteAuthVerifier {
    async fn verify(&self, access_token: &str) -> Result<AuthenticatedUser> {
        let response = self
            .client
            .get(&self.user_url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "auth lookup failed");
                unauthorized()
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "auth lookup rejected credential");
            return Err(unauthorized());
        }

        let user: UserResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "auth lookup returned an unreadable body");
            unauthorized()
        })?;

        if user.id.trim().is_empty() {
            return Err(unauthorized());
        }

        Ok(AuthenticatedUser {
            id: user.id,
            email: user.email,
        })
    }
}
