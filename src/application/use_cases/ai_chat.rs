use crate::application::use_cases::ai_proxy::{authorize, record_interaction};
use crate::application::use_cases::prompts::{build_chat_system_prompt, TEST_GENERATION_TIP};
use crate::domain::chat::{ActionType, ChatReply, ChatRequest};
use crate::domain::error::{AppError, Result};
use crate::domain::interaction::{ContextType, InteractionLogEntry};
use crate::domain::llm_config::LLMConfig;
use crate::domain::user::AuthenticatedUser;
use crate::infrastructure::auth::AuthVerifier;
use crate::infrastructure::db::InteractionLog;
use crate::infrastructure::llm_clients::LLMClient;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// Chat Proxy: QSuite product help.
pub struct ChatUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    auth: Arc<dyn AuthVerifier + Send + Sync>,
    interactions: Arc<dyn InteractionLog + Send + Sync>,
    provider: LLMConfig,
}

impl ChatUseCase {
    pub fn new(
        llm_client: Arc<dyn LLMClient + Send + Sync>,
        auth: Arc<dyn AuthVerifier + Send + Sync>,
        interactions: Arc<dyn InteractionLog + Send + Sync>,
        provider: LLMConfig,
    ) -> Self {
        Self {
            llm_client,
            auth,
            interactions,
            provider,
        }
    }

    pub async fn authorize(&self, authorization: Option<&str>) -> Result<AuthenticatedUser> {
        authorize(self.auth.as_ref(), &self.provider, authorization).await
    }

    fn request_config(&self) -> LLMConfig {
        LLMConfig {
            max_tokens: Some(2000),
            temperature: Some(0.7),
            top_p: Some(1.0),
            frequency_penalty: Some(0.1),
            presence_penalty: Some(0.1),
            json_response: false,
            ..self.provider.clone()
        }
    }

    pub async fn execute(&self, user: &AuthenticatedUser, request: ChatRequest) -> Result<ChatReply> {
        request
            .validate()
            .map_err(|_| AppError::ValidationError("Message is required".to_string()))?;

        let context_type = request.context_type().unwrap_or_default();
        let steer_to_generator = context_type == ContextType::TestGeneration;
        let system_prompt = build_chat_system_prompt(steer_to_generator);

        let answer = self
            .llm_client
            .generate(&self.request_config(), &system_prompt, &request.message)
            .await?;

        info!(user_id = %user.id, context_type = %context_type, "answered chat message");

        let reply = if steer_to_generator {
            ChatReply {
                content: format!("{}\n\n{}", answer, TEST_GENERATION_TIP),
                action_type: ActionType::FeatureGuidance,
                message: answer.clone(),
            }
        } else {
            ChatReply {
                content: answer.clone(),
                action_type: ActionType::ProductHelp,
                message: answer.clone(),
            }
        };

        record_interaction(
            self.interactions.as_ref(),
            InteractionLogEntry::new(&user.id, &request.message, answer, context_type),
        )
        .await;

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::fakes::{
        provider_config, FailingLog, FakeAuth, FakeLLMClient, RecordingLog, USER_ID,
    };
    use crate::application::use_cases::prompts::PRODUCT_HELP_SYSTEM_PROMPT;
    use crate::domain::chat::ChatContext;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: USER_ID.to_string(),
            email: None,
        }
    }

    fn request(message: &str, context_type: Option<&str>) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            context: context_type.map(|tag| ChatContext {
                context_type: Some(tag.to_string()),
            }),
        }
    }

    #[tokio::test]
    async fn test_plain_question_is_product_help() {
        let llm = Arc::new(FakeLLMClient::replying("Open the Queue tab."));
        let log = Arc::new(RecordingLog::default());
        let use_case = ChatUseCase::new(llm.clone(), Arc::new(FakeAuth), log.clone(), provider_config());

        let reply = use_case
            .execute(&user(), request("How do I schedule runs?", None))
            .await
            .unwrap();
        assert_eq!(reply.action_type, ActionType::ProductHelp);
        assert_eq!(reply.content, "Open the Queue tab.");
        assert_eq!(reply.message, reply.content);

        let (config, system, _) = llm.last_request().unwrap();
        assert_eq!(system, PRODUCT_HELP_SYSTEM_PROMPT);
        assert_eq!(config.max_tokens, Some(2000));
        assert_eq!(config.frequency_penalty, Some(0.1));
        assert!(!config.json_response);

        let entries = log.entries.lock().unwrap();
        assert_eq!(entries[0].context_type, ContextType::ProductHelp);
        assert_eq!(entries[0].response, "Open the Queue tab.");
    }

    #[tokio::test]
    async fn test_generation_context_steers_to_generator() {
        let llm = Arc::new(FakeLLMClient::replying("Use the generator."));
        let log = Arc::new(RecordingLog::default());
        let use_case = ChatUseCase::new(llm.clone(), Arc::new(FakeAuth), log.clone(), provider_config());

        let reply = use_case
            .execute(&user(), request("Write tests for login", Some("test_generation")))
            .await
            .unwrap();
        assert_eq!(reply.action_type, ActionType::FeatureGuidance);
        assert_eq!(reply.message, "Use the generator.");
        assert!(reply.content.starts_with("Use the generator.\n\n"));
        assert!(reply.content.ends_with(TEST_GENERATION_TIP));

        let (_, system, _) = llm.last_request().unwrap();
        assert!(system.contains("Note: The user is asking about test generation"));
        assert_eq!(
            log.entries.lock().unwrap()[0].context_type,
            ContextType::TestGeneration
        );
    }

    #[tokio::test]
    async fn test_other_context_types_are_logged_as_sent() {
        let log = Arc::new(RecordingLog::default());
        let use_case = ChatUseCase::new(
            Arc::new(FakeLLMClient::replying("ok")),
            Arc::new(FakeAuth),
            log.clone(),
            provider_config(),
        );

        let reply = use_case
            .execute(&user(), request("Speed up my suite", Some("test_optimization")))
            .await
            .unwrap();
        assert_eq!(reply.action_type, ActionType::ProductHelp);
        assert_eq!(
            log.entries.lock().unwrap()[0].context_type,
            ContextType::TestOptimization
        );
    }

    #[tokio::test]
    async fn test_unrecognised_context_tag_is_logged_verbatim() {
        let log = Arc::new(RecordingLog::default());
        let use_case = ChatUseCase::new(
            Arc::new(FakeLLMClient::replying("ok")),
            Arc::new(FakeAuth),
            log.clone(),
            provider_config(),
        );

        let reply = use_case
            .execute(&user(), request("What changed?", Some("release_notes")))
            .await
            .unwrap();
        assert_eq!(reply.action_type, ActionType::ProductHelp);
        assert_eq!(log.entries.lock().unwrap()[0].context_type.as_str(), "release_notes");
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected_without_provider_call() {
        let llm = Arc::new(FakeLLMClient::replying("unused"));
        let use_case = ChatUseCase::new(llm.clone(), Arc::new(FakeAuth), Arc::new(FailingLog), provider_config());

        let err = use_case.execute(&user(), request("  ", None)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_log_failure_is_swallowed() {
        let use_case = ChatUseCase::new(
            Arc::new(FakeLLMClient::replying("fine")),
            Arc::new(FakeAuth),
            Arc::new(FailingLog),
            provider_config(),
        );
        let reply = use_case.execute(&user(), request("hi", None)).await.unwrap();
        assert_eq!(reply.content, "fine");
    }
}
