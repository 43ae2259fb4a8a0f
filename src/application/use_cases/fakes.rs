//! Hand-written doubles for the service seams.

use crate::domain::error::{AppError, Result};
use crate::domain::generation::{GeneratedTestCases, GenerationRequest};
use crate::domain::interaction::InteractionLogEntry;
use crate::domain::llm_config::LLMConfig;
use crate::domain::user::AuthenticatedUser;
use crate::infrastructure::auth::AuthVerifier;
use crate::infrastructure::db::InteractionLog;
use crate::infrastructure::generation_gateway::GenerationGateway;
use crate::infrastructure::llm_clients::LLMClient;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const VALID_TOKEN: &str = "valid-token";
pub const USER_ID: &str = "user-1";

pub fn provider_config() -> LLMConfig {
    LLMConfig {
        api_key: Some("sk-test".to_string()),
        ..LLMConfig::default()
    }
}

/// Replies with a canned completion and records what it was sent.
pub struct FakeLLMClient {
    reply: Result<String>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(LLMConfig, String, String)>>,
}

impl FakeLLMClient {
    pub fn replying(reply: &str) -> Self {
        Self::with(Ok(reply.to_string()))
    }

    pub fn failing(err: AppError) -> Self {
        Self::with(Err(err))
    }

    fn with(reply: Result<String>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(LLMConfig, String, String)> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LLMClient for FakeLLMClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((config.clone(), system.to_string(), user.to_string()));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(err) => Err(AppError::LLMError(err.message().to_string())),
        }
    }
}

/// Accepts only [`VALID_TOKEN`].
pub struct FakeAuth;

#[async_trait]
impl AuthVerifier for FakeAuth {
    async fn verify(&self, access_token: &str) -> Result<AuthenticatedUser> {
        if access_token == VALID_TOKEN {
            Ok(AuthenticatedUser {
                id: USER_ID.to_string(),
                email: Some("qa@example.com".to_string()),
            })
        } else {
            Err(AppError::Unauthorized("Unauthorized".to_string()))
        }
    }
}

#[derive(Default)]
pub struct RecordingLog {
    pub entries: Mutex<Vec<InteractionLogEntry>>,
}

#[async_trait]
impl InteractionLog for RecordingLog {
    async fn append(&self, entry: &InteractionLogEntry) -> Result<()> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

pub struct FailingLog;

#[async_trait]
impl InteractionLog for FailingLog {
    async fn append(&self, _entry: &InteractionLogEntry) -> Result<()> {
        Err(AppError::DatabaseError("disk full".to_string()))
    }
}

/// Returns a fixed result and counts calls.
pub struct FakeGateway {
    result: Result<GeneratedTestCases>,
    pub calls: AtomicUsize,
}

impl FakeGateway {
    pub fn returning(result: Result<GeneratedTestCases>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GenerationGateway for FakeGateway {
    async fn generate(
        &self,
        _access_token: &str,
        _request: &GenerationRequest,
    ) -> Result<GeneratedTestCases> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Ok(generated) => Ok(generated.clone()),
            Err(err) => Err(AppError::LLMError(err.message().to_string())),
        }
    }
}
