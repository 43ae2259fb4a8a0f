//! Client-side access to the Generation Proxy.

use crate::domain::error::{AppError, Result};
use crate::domain::generation::{GeneratedTestCases, GenerationRequest, GenerationResponse};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{info, warn};
use url::Url;

pub const GENERATE_TESTS_PATH: &str = "functions/v1/ai-generate-tests";

// Suffix of the proxy's missing-key message, e.g. "OpenAI API key not configured".
const NOT_CONFIGURED: &str = "not configured";

#[async_trait]
pub trait GenerationGateway {
    async fn generate(
        &self,
        access_token: &str,
        request: &GenerationRequest,
    ) -> Result<GeneratedTestCases>;
}

/// Calls a deployed Generation Proxy over HTTP.
pub struct GenerationProxyClient {
    client: reqwest::Client,
    endpoint: Url,
    anon_key: String,
}

impl GenerationProxyClient {
    pub fn new(project_url: &str, anon_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: endpoint_url(project_url)?,
            anon_key: anon_key.into(),
        })
    }
}

fn endpoint_url(project_url: &str) -> Result<Url> {
    let mut base = project_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base)
        .and_then(|url| url.join(GENERATE_TESTS_PATH))
        .map_err(|e| AppError::ConfigurationError(format!("Invalid project URL: {e}")))
}

/// Maps a proxy failure to the error the proxy itself reported.
fn failure_error(status: StatusCode, message: Option<String>) -> AppError {
    let message = message
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::BAD_REQUEST => AppError::ValidationError(message),
        StatusCode::BAD_GATEWAY => AppError::LLMError(message),
        StatusCode::INTERNAL_SERVER_ERROR if message.contains(NOT_CONFIGURED) => {
            AppError::ConfigurationError(message)
        }
        _ => AppError::Internal(message),
    }
}

#[async_trait]
impl GenerationGateway for GenerationProxyClient {
    async fn generate(
        &self,
        access_token: &str,
        request: &GenerationRequest,
    ) -> Result<GeneratedTestCases> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Request failed: {e}")))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<GenerationResponse>(&text).ok();

        match body {
            Some(body) if status.is_success() && body.success => {
                info!(count = body.count, degraded = body.degraded, "received generated test cases");
                Ok(GeneratedTestCases {
                    test_cases: body.test_cases,
                    degraded: body.degraded,
                })
            }
            Some(body) => {
                warn!(status = %status, error = ?body.error, "generation proxy reported failure");
                Err(failure_error(status, body.error))
            }
            None => {
                warn!(status = %status, "generation proxy returned an unreadable body");
                Err(failure_error(status, None))
            }
        }
    }
}
