use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum ContextType {
    TestGeneration,
    TestOptimization,
    GeneralChat,
    #[default]
    ProductHelp,
    /// A client tag with no dedicated handling, logged as sent.
    Other(String),
}

impl ContextType {
    /// Maps a client-supplied tag. A blank tag counts as product help.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "" | "product_help" => ContextType::ProductHelp,
            "test_generation" => ContextType::TestGeneration,
            "test_optimization" => ContextType::TestOptimization,
            "general_chat" => ContextType::GeneralChat,
            other => ContextType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContextType::TestGeneration => "test_generation",
            ContextType::TestOptimization => "test_optimization",
            ContextType::GeneralChat => "general_chat",
            ContextType::ProductHelp => "product_help",
            ContextType::Other(tag) => tag,
        }
    }
}

impl From<String> for ContextType {
    fn from(tag: String) -> Self {
        ContextType::from_tag(&tag)
    }
}

impl From<ContextType> for String {
    fn from(context_type: ContextType) -> Self {
        context_type.as_str().to_string()
    }
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only audit record of one AI request/response pair.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InteractionLogEntry {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub response: String,
    pub context_type: ContextType,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl InteractionLogEntry {
    pub fn new(
        user_id: &str,
        message: &str,
        response: String,
        context_type: ContextType,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            message: message.to_string(),
            response,
            context_type,
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_context_tag_is_kept_verbatim() {
        assert_eq!(
            ContextType::from_tag(" release_notes "),
            ContextType::Other("release_notes".to_string())
        );
        assert_eq!(ContextType::from_tag("release_notes").as_str(), "release_notes");
        assert_eq!(ContextType::from_tag("   "), ContextType::ProductHelp);
        assert_eq!(ContextType::from_tag("test_generation"), ContextType::TestGeneration);
        assert_eq!(ContextType::TestOptimization.to_string(), "test_optimization");
    }

    #[test]
    fn test_context_type_serializes_as_tag() {
        let value = serde_json::to_value(ContextType::Other("custom".to_string())).unwrap();
        assert_eq!(value, serde_json::json!("custom"));
        let parsed: ContextType = serde_json::from_str("\"general_chat\"").unwrap();
        assert_eq!(parsed, ContextType::GeneralChat);
    }
}
