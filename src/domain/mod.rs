pub mod chat;
pub mod error;
pub mod generation;
pub mod interaction;
pub mod llm_config;
pub mod test_case;
pub mod user;
