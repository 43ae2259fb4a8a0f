//! Turns free-form provider text into a non-empty list of valid test cases.
//!
//! The strict path accepts a JSON array or a `{"testCases": [...]}` object.
//! Anything it cannot use falls through to the line-based extractor in
//! [`heuristic`], and when that finds nothing a single synthetic record is
//! produced. Normalization never fails.

mod heuristic;
mod strict;

pub use heuristic::{extract_test_cases, split_sections, synthesize_test_case};

use crate::domain::test_case::NormalizedTestCase;
use crate::infrastructure::response::{clean_llm_response, strip_code_fences};
use tracing::{debug, warn};

/// Which path produced the test cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationOutcome {
    /// Strict JSON parse and validation succeeded.
    Parsed(Vec<NormalizedTestCase>),
    /// JSON was unusable; sections were salvaged from the text.
    Fallback(Vec<NormalizedTestCase>),
    /// Nothing was salvageable; one synthetic record stands in.
    Empty(NormalizedTestCase),
}

impl NormalizationOutcome {
    pub fn degraded(&self) -> bool {
        !matches!(self, NormalizationOutcome::Parsed(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            NormalizationOutcome::Parsed(_) => "parsed",
            NormalizationOutcome::Fallback(_) => "fallback",
            NormalizationOutcome::Empty(_) => "empty",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NormalizationOutcome::Parsed(cases) | NormalizationOutcome::Fallback(cases) => {
                cases.len()
            }
            NormalizationOutcome::Empty(_) => 1,
        }
    }

    pub fn into_test_cases(self) -> Vec<NormalizedTestCase> {
        match self {
            NormalizationOutcome::Parsed(cases) | NormalizationOutcome::Fallback(cases) => cases,
            NormalizationOutcome::Empty(case) => vec![case],
        }
    }
}

pub fn normalize(raw: &str) -> NormalizationOutcome {
    let cleaned = strip_code_fences(&clean_llm_response(raw));

    match strict::parse_candidates(&cleaned) {
        Ok(candidates) => {
            let total = candidates.len();
            let cases = strict::normalize_candidates(&candidates);
            if !cases.is_empty() {
                if cases.len() < total {
                    debug!(
                        kept = cases.len(),
                        dropped = total - cases.len(),
                        "filtered test cases without a usable name"
                    );
                }
                return NormalizationOutcome::Parsed(cases);
            }
            warn!(candidates = total, "no valid test cases after filtering, using fallback parser");
        }
        Err(reason) => {
            warn!(reason = %reason, chars = cleaned.len(), "strict JSON parse failed, using fallback parser");
        }
    }

    let salvaged = extract_test_cases(&cleaned);
    if salvaged.is_empty() {
        NormalizationOutcome::Empty(synthesize_test_case(&cleaned))
    } else {
        NormalizationOutcome::Fallback(salvaged)
    }
}
