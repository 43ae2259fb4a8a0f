use crate::domain::test_case::NormalizedTestCase;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<FileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub requirements: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<GenerationContext>,
}

impl GenerationRequest {
    pub fn new(requirements: impl Into<String>) -> Self {
        Self {
            requirements: requirements.into(),
            context: None,
        }
    }

    pub fn with_file(mut self, file_id: FileId) -> Self {
        self.context.get_or_insert_with(GenerationContext::default).file_id = Some(file_id);
        self
    }
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Proxy result: the normalized list plus whether it came from salvage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTestCases {
    pub test_cases: Vec<NormalizedTestCase>,
    #[serde(default)]
    pub degraded: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(default)]
    pub test_cases: Vec<NormalizedTestCase>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub degraded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResponse {
    pub fn success(generated: GeneratedTestCases) -> Self {
        Self {
            success: true,
            count: generated.test_cases.len(),
            test_cases: generated.test_cases,
            degraded: generated.degraded,
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            test_cases: Vec::new(),
            count: 0,
            degraded: false,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_numeric_and_string_file_ids() {
        let numeric: GenerationRequest =
            serde_json::from_str(r#"{"requirements":"login","context":{"fileId":42}}"#).unwrap();
        assert_eq!(
            numeric.context.unwrap().file_id,
            Some(FileId::Number(42))
        );

        let text: GenerationRequest = serde_json::from_str(
            r#"{"requirements":"login","context":{"fileId":"abc","format":"gherkin"}}"#,
        )
        .unwrap();
        let context = text.context.unwrap();
        assert_eq!(context.file_id, Some(FileId::Text("abc".to_string())));
        assert_eq!(context.format.as_deref(), Some("gherkin"));
    }

    #[test]
    fn test_blank_requirements_fail_validation() {
        assert!(GenerationRequest::new("  \n ").validate().is_err());
        assert!(GenerationRequest::default().validate().is_err());
        assert!(GenerationRequest::new("checkout flow").validate().is_ok());
    }

    #[test]
    fn test_failure_body_shape() {
        let json = serde_json::to_value(GenerationResponse::failure("boom".to_string())).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
        assert_eq!(json["testCases"], serde_json::json!([]));
    }
}
