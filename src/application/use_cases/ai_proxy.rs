//! Checks and side effects shared by the AI proxies.

use crate::domain::error::{AppError, Result};
use crate::domain::interaction::InteractionLogEntry;
use crate::domain::llm_config::LLMConfig;
use crate::domain::user::AuthenticatedUser;
use crate::infrastructure::auth::{bearer_token, AuthVerifier};
use crate::infrastructure::db::InteractionLog;
use tracing::warn;

/// Resolves the caller, then confirms a provider key is configured.
///
/// Runs before the body is read so rejected callers never reach the provider.
pub async fn authorize(
    auth: &(dyn AuthVerifier + Send + Sync),
    provider: &LLMConfig,
    authorization: Option<&str>,
) -> Result<AuthenticatedUser> {
    let token = bearer_token(authorization)?;
    let user = auth.verify(token).await?;

    if provider.api_key().is_none() {
        return Err(AppError::ConfigurationError(format!(
            "{} API key not configured",
            provider.provider.label()
        )));
    }
    Ok(user)
}

/// Appends to the interaction log; a failed write never fails the request.
pub async fn record_interaction(
    log: &(dyn InteractionLog + Send + Sync),
    entry: InteractionLogEntry,
) {
    if let Err(err) = log.append(&entry).await {
        warn!(
            error = %err,
            user_id = %entry.user_id,
            context_type = %entry.context_type,
            "failed to record AI interaction"
        );
    }
}
