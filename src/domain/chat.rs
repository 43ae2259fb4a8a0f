use crate::domain::generation::not_blank;
use crate::domain::interaction::ContextType;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatContext {
    #[serde(rename = "type", default)]
    pub context_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub message: String,
    #[serde(default)]
    pub context: Option<ChatContext>,
}

impl ChatRequest {
    pub fn context_type(&self) -> Option<ContextType> {
        self.context
            .as_ref()
            .and_then(|context| context.context_type.as_deref())
            .map(ContextType::from_tag)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    ProductHelp,
    FeatureGuidance,
    Error,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub content: String,
    pub action_type: ActionType,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_ignores_extra_context_fields() {
        let request: ChatRequest = serde_json::from_str(
            r#"{"message":"hi","context":{"type":"general_chat","product":"QSuite","testCases":[]}}"#,
        )
        .unwrap();
        assert_eq!(request.context_type(), Some(ContextType::GeneralChat));
    }

    #[test]
    fn test_reply_uses_camel_case() {
        let reply = ChatReply {
            content: "c".to_string(),
            action_type: ActionType::FeatureGuidance,
            message: "m".to_string(),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["actionType"], "feature_guidance");
    }
}
