use std::sync::Arc;

use tracing::{info, warn};

use crate::application::{ChatUseCase, GenerateTestsUseCase};
use crate::domain::error::Result;
use crate::infrastructure::auth::{AuthVerifier, RemoteAuthVerifier};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::{connect, InteractionLog, InteractionRepository};
use crate::infrastructure::llm_clients::{LLMClient, OpenAIClient};
use crate::interfaces::http::HttpState;

/// Wires the provider client, auth verifier and interaction log into the HTTP state.
pub async fn build_state(config: &AppConfig) -> Result<HttpState> {
    let pool = connect(&config.database.url).await?;

    let llm_client: Arc<dyn LLMClient + Send + Sync> = Arc::new(OpenAIClient::new());
    let auth: Arc<dyn AuthVerifier + Send + Sync> = Arc::new(RemoteAuthVerifier::new(&config.auth));
    let interactions: Arc<dyn InteractionLog + Send + Sync> =
        Arc::new(InteractionRepository::new(pool));

    let provider = config.provider.llm_config();
    if provider.api_key().is_none() {
        warn!(
            provider = provider.provider.label(),
            "no provider API key configured; AI requests will be rejected"
        );
    }
    if config.auth.project_url.trim().is_empty() {
        warn!("no auth project URL configured; every credential will be rejected");
    }
    info!(
        provider = provider.provider.label(),
        model = %provider.model,
        base_url = %provider.base_url,
        "AI provider configured"
    );

    Ok(HttpState {
        generate_tests: Arc::new(GenerateTestsUseCase::new(
            llm_client.clone(),
            auth.clone(),
            interactions.clone(),
            provider.clone(),
        )),
        chat: Arc::new(ChatUseCase::new(llm_client, auth, interactions, provider)),
    })
}
