//! Service configuration.
//!
//! Layers, lowest priority first: built-in defaults, `qsuite.toml`, `QSUITE_*`
//! environment variables (`__` separates nested keys), then the well-known
//! names `OPENAI_API_KEY`, `PROJECT_URL` and `ANON_KEY`. A `.env` file is
//! loaded into the environment before any of this runs.

use crate::domain::error::Result;
use crate::domain::llm_config::{LLMConfig, LLMProvider};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "qsuite.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub provider: ProviderConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://qsuite.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider: LLMProvider,
    /// Falls back to the provider's public endpoint when unset.
    pub base_url: Option<String>,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::OpenAI,
            base_url: None,
            model: "gpt-4o-mini".to_string(),
            api_key: None,
        }
    }
}

impl ProviderConfig {
    /// Base provider settings; use cases layer their sampling parameters on top.
    pub fn llm_config(&self) -> LLMConfig {
        LLMConfig {
            provider: self.provider,
            base_url: self
                .base_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| self.provider.default_base_url().to_string()),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            ..LLMConfig::default()
        }
    }
}

/// Backend auth endpoint used to resolve bearer credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub project_url: String,
    pub anon_key: String,
}

impl AppConfig {
    pub fn figment(config_file: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_file.as_ref()))
            .merge(Env::prefixed("QSUITE_").split("__"))
            .merge(raw_env("OPENAI_API_KEY", "provider.api_key"))
            .merge(raw_env("PROJECT_URL", "auth.project_url"))
            .merge(raw_env("ANON_KEY", "auth.anon_key"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }

    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_figment(Self::figment(DEFAULT_CONFIG_FILE))
    }
}

fn raw_env(name: &'static str, key: &'static str) -> Env {
    Env::raw().only(&[name]).map(move |_| key.into())
}
