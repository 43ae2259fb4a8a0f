use crate::domain::test_case::{
    truncate_chars, NormalizedTestCase, DEFAULT_CATEGORY, DEFAULT_TAG, MAX_DESCRIPTION_CHARS,
    MAX_NAME_CHARS, MAX_SCENARIO_CHARS,
};
use serde_json::Value;

const GENERIC_SCENARIOS: [&str; 3] = [
    "Execute the test case as described",
    "Verify expected results match requirements",
    "Document any issues or deviations found",
];

/// Accepts a bare array or an object carrying a `testCases` array.
pub(super) fn parse_candidates(text: &str) -> Result<Vec<Value>, String> {
    let parsed: Value = serde_json::from_str(text).map_err(|err| err.to_string())?;
    match parsed {
        Value::Array(items) => Ok(items),
        Value::Object(mut object) => match object.remove("testCases") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err("unexpected JSON structure: missing testCases array".to_string()),
        },
        other => Err(format!("unexpected JSON structure: {}", json_kind(&other))),
    }
}

pub(super) fn normalize_candidates(candidates: &[Value]) -> Vec<NormalizedTestCase> {
    candidates.iter().filter_map(normalize_candidate).collect()
}

fn normalize_candidate(candidate: &Value) -> Option<NormalizedTestCase> {
    let object = candidate.as_object()?;
    let name = object.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }

    let mut scenarios: Vec<String> = match object.get("scenarios") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|scenario| !scenario.is_empty())
            .map(|scenario| truncate_chars(scenario, MAX_SCENARIO_CHARS))
            .collect(),
        Some(Value::String(scenario)) if !scenario.trim().is_empty() => {
            vec![truncate_chars(scenario.trim(), MAX_SCENARIO_CHARS)]
        }
        _ => Vec::new(),
    };
    if scenarios.is_empty() {
        scenarios = GENERIC_SCENARIOS.iter().map(|s| s.to_string()).collect();
    }

    let description = non_blank_str(object.get("description"))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Test case to validate {}", name.to_lowercase()));

    let category = non_blank_str(object.get("category"))
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

    let tags = match object.get("tags") {
        Some(Value::Array(items)) => {
            let mut tags: Vec<String> = Vec::new();
            for tag in items.iter().filter_map(Value::as_str).map(str::trim) {
                if !tag.is_empty() && !tags.iter().any(|existing| existing == tag) {
                    tags.push(tag.to_string());
                }
            }
            tags
        }
        _ => vec![DEFAULT_TAG.to_string()],
    };

    Some(NormalizedTestCase {
        name: truncate_chars(name, MAX_NAME_CHARS),
        description: truncate_chars(&description, MAX_DESCRIPTION_CHARS),
        scenarios,
        category,
        tags,
    })
}

fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
