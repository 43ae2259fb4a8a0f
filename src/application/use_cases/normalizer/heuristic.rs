use crate::domain::test_case::{
    truncate_chars, NormalizedTestCase, DEFAULT_CATEGORY, DEFAULT_TAG, MAX_DESCRIPTION_CHARS,
    MAX_NAME_CHARS, MAX_SCENARIO_CHARS,
};
use once_cell::sync::Lazy;
use regex::Regex;

const MIN_SECTION_CHARS: usize = 10;
const MIN_NAME_CHARS: usize = 3;
const SUMMARY_WORDS: usize = 10;

const FALLBACK_SCENARIOS: [&str; 3] = [
    "Execute the test scenario as described",
    "Verify expected results",
    "Document any findings",
];

const SYNTHETIC_NAME: &str = "Generated Test Case";
const SYNTHETIC_SCENARIOS: [&str; 3] = [
    "Review the test requirements",
    "Execute the test steps",
    "Verify the expected results",
];

static SECTION_HEADER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:test\s*case(?:\s*\d+|\b)|tc\s*\d+|#{1,3}\s*[^#\s])").unwrap());

static NUMBERED_HEADER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)]\s*[A-Z]").unwrap());

static HEADING_PREFIX_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,3}\s*").unwrap());

static TEST_CASE_PREFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:test\s*case(?:\s*\d+|\b)|tc\s*\d+)\s*[:\-.)]?\s*").unwrap()
});

static NUMBER_PREFIX_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]\s*").unwrap());

static STEP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:\d+[.)]|[-•]|step\s*\d*\b|scenario\b|given\b|when\b|then\b)").unwrap()
});

static STEP_MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:\d+[.)]\s*|[-•]\s*|step\s*\d*\s*[:\-.)]?\s*)").unwrap()
});

static GHERKIN_MARKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:scenario|given|when|then)\s*[:\-.]?\s*").unwrap());

// "Steps:", "Expected Result:" and similar labels carry no content.
static LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\s]{1,30}:$").unwrap());

static SEPARATOR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-=*_]{3,}$").unwrap());

fn strip_emphasis(line: &str) -> &str {
    line.trim().trim_matches(|c| c == '*' || c == '_').trim()
}

fn is_section_header(line: &str) -> bool {
    SECTION_HEADER_PATTERN.is_match(strip_emphasis(line))
}

/// Splits raw text into candidate test-case sections.
///
/// Lines that open with `Test Case`, `TC <n>` or a markdown heading start a
/// new section. Only when no such line exists do numbered lines (`1. Login`)
/// act as boundaries, so numbered steps under a heading stay in its section.
/// Text before the first boundary forms its own section. Sections shorter
/// than ten characters are dropped.
pub fn split_sections(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let headed = lines.iter().any(|line| is_section_header(line));
    let is_boundary = |line: &str| {
        if headed {
            is_section_header(line)
        } else {
            NUMBERED_HEADER_PATTERN.is_match(strip_emphasis(line))
        }
    };

    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines {
        if is_boundary(line) && !current.is_empty() {
            sections.push(current.join("\n"));
            current.clear();
        }
        current.push(line);
    }
    if !current.is_empty() {
        sections.push(current.join("\n"));
    }

    sections
        .into_iter()
        .map(|section| section.trim().to_string())
        .filter(|section| section.chars().count() >= MIN_SECTION_CHARS)
        .collect()
}

fn derive_name(first_line: &str) -> String {
    let line = strip_emphasis(first_line);
    let line = HEADING_PREFIX_PATTERN.replace(line, "");
    let line = strip_emphasis(&line).to_string();
    let line = TEST_CASE_PREFIX_PATTERN.replace(&line, "");
    let line = NUMBER_PREFIX_PATTERN.replace(&line, "");
    strip_emphasis(&line).to_string()
}

fn clean_step(line: &str) -> String {
    let step = STEP_MARKER_PATTERN.replace(line, "");
    let step = GHERKIN_MARKER_PATTERN.replace(&step, "");
    step.trim().to_string()
}

fn section_to_test_case(section: &str) -> Option<NormalizedTestCase> {
    let lines: Vec<&str> = section
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let (first, rest) = lines.split_first()?;
    // A lone lead-in such as "Here are the test cases:" is not a test case.
    if rest.is_empty() && LABEL_PATTERN.is_match(first) {
        return None;
    }

    let name = derive_name(first);
    if name.chars().count() < MIN_NAME_CHARS {
        return None;
    }
    let name = truncate_chars(&name, MAX_NAME_CHARS);

    let mut description: Option<String> = None;
    let mut scenarios: Vec<String> = Vec::new();
    let mut in_steps = false;

    for line in rest {
        if SEPARATOR_PATTERN.is_match(line) || LABEL_PATTERN.is_match(line) {
            continue;
        }
        if STEP_PATTERN.is_match(line) {
            in_steps = true;
            let step = clean_step(line);
            if !step.is_empty() {
                scenarios.push(truncate_chars(&step, MAX_SCENARIO_CHARS));
            }
        } else if !in_steps && description.is_none() && line.chars().count() > 5 {
            description = Some(truncate_chars(line, MAX_DESCRIPTION_CHARS));
        } else if in_steps && line.chars().count() > 3 {
            scenarios.push(truncate_chars(line, MAX_SCENARIO_CHARS));
        }
    }

    let description = description
        .unwrap_or_else(|| format!("Test case to verify {}", name.to_lowercase()));
    if scenarios.is_empty() {
        scenarios = FALLBACK_SCENARIOS.iter().map(|s| s.to_string()).collect();
    }

    Some(NormalizedTestCase {
        name,
        description,
        scenarios,
        category: DEFAULT_CATEGORY.to_string(),
        tags: vec![DEFAULT_TAG.to_string(), "fallback-parsed".to_string()],
    })
}

/// Salvages test cases from text that did not parse as usable JSON.
/// Returns an empty list when no section yields a usable name.
pub fn extract_test_cases(text: &str) -> Vec<NormalizedTestCase> {
    split_sections(text)
        .iter()
        .filter_map(|section| section_to_test_case(section))
        .collect()
}

/// Stand-in record for output nothing could be salvaged from.
pub fn synthesize_test_case(text: &str) -> NormalizedTestCase {
    let words = text
        .split_whitespace()
        .take(SUMMARY_WORDS)
        .collect::<Vec<_>>()
        .join(" ");

    NormalizedTestCase {
        name: SYNTHETIC_NAME.to_string(),
        description: truncate_chars(
            &format!("AI generated test case: {}...", words),
            MAX_DESCRIPTION_CHARS,
        ),
        scenarios: SYNTHETIC_SCENARIOS.iter().map(|s| s.to_string()).collect(),
        category: DEFAULT_CATEGORY.to_string(),
        tags: vec![DEFAULT_TAG.to_string(), "fallback".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_name_strips_markers() {
        let cases = [
            ("Test Case 1: Login", "Login"),
            ("TC 2 - Logout", "Logout"),
            ("TC3. Reset password", "Reset password"),
            ("## Test Case 3: Cart", "Cart"),
            ("**Test Case 4: Payment**", "Payment"),
            ("### Search filters", "Search filters"),
            ("1. Profile update", "Profile update"),
            ("TCP handshake", "TCP handshake"),
            ("Test Cases for checkout", "Test Cases for checkout"),
        ];
        for (input, expected) in cases {
            assert_eq!(derive_name(input), expected, "input: {input}");
        }
    }

    #[test]
    fn test_clean_step_strips_markers() {
        let cases = [
            ("1. Enter credentials", "Enter credentials"),
            ("2) Submit", "Submit"),
            ("- Open the cart", "Open the cart"),
            ("• Pay", "Pay"),
            ("Step 3: Confirm order", "Confirm order"),
            ("Given a registered user", "a registered user"),
            ("Then: the dashboard loads", "the dashboard loads"),
        ];
        for (input, expected) in cases {
            assert_eq!(clean_step(input), expected, "input: {input}");
        }
    }

    #[test]
    fn test_step_pattern_requires_word_boundary() {
        assert!(STEP_PATTERN.is_match("When the user logs in"));
        assert!(!STEP_PATTERN.is_match("Whenever possible"));
        assert!(!STEP_PATTERN.is_match("Steps:"));
    }

    #[test]
    fn test_synthetic_description_uses_first_ten_words() {
        let case = synthesize_test_case("one two three four five six seven eight nine ten eleven");
        assert_eq!(
            case.description,
            "AI generated test case: one two three four five six seven eight nine ten..."
        );
    }
}
