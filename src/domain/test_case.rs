use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const MAX_NAME_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const MAX_SCENARIO_CHARS: usize = 300;

pub const DEFAULT_CATEGORY: &str = "AI Generated";
pub const DEFAULT_TAG: &str = "ai-generated";

/// Canonical test case produced from provider output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NormalizedTestCase {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: String,
    #[validate(length(min = 1), custom(function = "validate_scenarios"))]
    pub scenarios: Vec<String>,
    pub category: String,
    pub tags: Vec<String>,
}

fn validate_scenarios(scenarios: &[String]) -> Result<(), ValidationError> {
    let valid = scenarios.iter().all(|scenario| {
        !scenario.trim().is_empty() && scenario.chars().count() <= MAX_SCENARIO_CHARS
    });
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("scenario"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Insert request for one selected test case.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTestCase {
    #[validate(length(min = 1))]
    pub user_id: String,
    pub category_id: i64,
    #[validate(nested)]
    pub test_case: NormalizedTestCase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTestCase {
    pub id: i64,
    pub user_id: String,
    pub category_id: i64,
    #[serde(flatten)]
    pub test_case: NormalizedTestCase,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Truncates to at most `max` characters, never splitting a code point.
pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((index, _)) => value[..index].to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NormalizedTestCase {
        NormalizedTestCase {
            name: "Login".to_string(),
            description: "Valid credentials reach the dashboard".to_string(),
            scenarios: vec!["Enter credentials".to_string()],
            category: DEFAULT_CATEGORY.to_string(),
            tags: vec![DEFAULT_TAG.to_string()],
        }
    }

    #[test]
    fn test_truncate_chars_counts_code_points() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 200), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_valid_case_passes_validation() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_empty_scenarios_fail_validation() {
        let mut case = sample();
        case.scenarios.clear();
        assert!(case.validate().is_err());

        let mut case = sample();
        case.scenarios = vec!["   ".to_string()];
        assert!(case.validate().is_err());
    }

    #[test]
    fn test_overlong_name_fails_validation() {
        let mut case = sample();
        case.name = "x".repeat(MAX_NAME_CHARS + 1);
        assert!(case.validate().is_err());
    }

    #[test]
    fn test_persisted_case_flattens_fields() {
        let persisted = PersistedTestCase {
            id: 7,
            user_id: "user-1".to_string(),
            category_id: 3,
            test_case: sample(),
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&persisted).unwrap();
        assert_eq!(json["name"], "Login");
        assert_eq!(json["categoryId"], 3);
        assert_eq!(json["scenarios"][0], "Enter credentials");
    }
}
