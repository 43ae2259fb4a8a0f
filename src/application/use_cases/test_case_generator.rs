//! Screen state for the AI Test Generator.
//!
//! Input → (submit) → Review → (confirm) → Created. A failed submit leaves the
//! generator in Input; a failed confirm leaves the step and the selection
//! exactly as they were so the user can retry.

use crate::domain::error::{AppError, Result};
use crate::domain::generation::{FileId, GenerationRequest};
use crate::domain::test_case::{NewTestCase, NormalizedTestCase, PersistedTestCase, DEFAULT_CATEGORY};
use crate::domain::user::UserSession;
use crate::infrastructure::db::TestCaseStore;
use crate::infrastructure::generation_gateway::GenerationGateway;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorStep {
    Input,
    Review,
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedItem {
    pub test_case: NormalizedTestCase,
    pub selected: bool,
}

/// Where confirmed test cases are filed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryTarget {
    Existing(i64),
    New(String),
    /// The user's "AI Generated" category, created on first use.
    Default,
}

pub struct TestCaseGenerator {
    gateway: Arc<dyn GenerationGateway + Send + Sync>,
    store: Arc<dyn TestCaseStore + Send + Sync>,
    session: UserSession,
    step: GeneratorStep,
    items: Vec<GeneratedItem>,
    degraded: bool,
    created: Vec<PersistedTestCase>,
}

impl TestCaseGenerator {
    pub fn new(
        gateway: Arc<dyn GenerationGateway + Send + Sync>,
        store: Arc<dyn TestCaseStore + Send + Sync>,
        session: UserSession,
    ) -> Self {
        Self {
            gateway,
            store,
            session,
            step: GeneratorStep::Input,
            items: Vec::new(),
            degraded: false,
            created: Vec::new(),
        }
    }

    pub fn step(&self) -> GeneratorStep {
        self.step
    }

    pub fn items(&self) -> &[GeneratedItem] {
        &self.items
    }

    /// True when the last list was salvaged from non-JSON output.
    pub fn degraded(&self) -> bool {
        self.degraded
    }

    pub fn created(&self) -> &[PersistedTestCase] {
        &self.created
    }

    pub async fn submit(&mut self, requirements: &str, context_id: Option<FileId>) -> Result<usize> {
        if requirements.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Please enter test requirements".to_string(),
            ));
        }

        let mut request = GenerationRequest::new(requirements.trim());
        if let Some(file_id) = context_id {
            request = request.with_file(file_id);
        }

        let generated = self
            .gateway
            .generate(&self.session.access_token, &request)
            .await
            .map_err(|err| {
                warn!(error = %err, "test case generation failed");
                err
            })?;
        if generated.test_cases.is_empty() {
            return Err(AppError::Internal("No test cases were generated".to_string()));
        }

        self.items = generated
            .test_cases
            .into_iter()
            .map(|test_case| GeneratedItem {
                test_case,
                selected: true,
            })
            .collect();
        self.degraded = generated.degraded;
        self.created.clear();
        self.step = GeneratorStep::Review;
        Ok(self.items.len())
    }

    /// Flips one item's selection; `None` when the index is out of range.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let item = self.items.get_mut(index)?;
        item.selected = !item.selected;
        Some(item.selected)
    }

    pub fn select_all(&mut self) {
        self.items.iter_mut().for_each(|item| item.selected = true);
    }

    pub fn clear_selection(&mut self) {
        self.items.iter_mut().for_each(|item| item.selected = false);
    }

    pub fn selected(&self) -> Vec<&NormalizedTestCase> {
        self.items
            .iter()
            .filter(|item| item.selected)
            .map(|item| &item.test_case)
            .collect()
    }

    async fn find_or_create_category(&self, name: &str) -> Result<i64> {
        let user_id = &self.session.user_id;
        match self.store.find_category_by_name(user_id, name).await? {
            Some(category) => Ok(category.id),
            None => Ok(self.store.create_category(user_id, name).await?.id),
        }
    }

    async fn resolve_category(&self, target: &CategoryTarget) -> Result<i64> {
        match target {
            CategoryTarget::Existing(id) => Ok(*id),
            CategoryTarget::New(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(AppError::ValidationError(
                        "Please enter a category name".to_string(),
                    ));
                }
                self.find_or_create_category(name).await
            }
            CategoryTarget::Default => self.find_or_create_category(DEFAULT_CATEGORY).await,
        }
    }

    /// Persists the selected items in one atomic insert.
    pub async fn confirm(&mut self, target: CategoryTarget) -> Result<Vec<PersistedTestCase>> {
        if self.step != GeneratorStep::Review {
            return Err(AppError::ValidationError(
                "There are no generated test cases to save".to_string(),
            ));
        }
        let selected = self.selected();
        if selected.is_empty() {
            return Err(AppError::ValidationError(
                "Please select at least one test case".to_string(),
            ));
        }

        let category_id = self.resolve_category(&target).await?;
        let inserts: Vec<NewTestCase> = selected
            .into_iter()
            .map(|test_case| NewTestCase {
                user_id: self.session.user_id.clone(),
                category_id,
                test_case: test_case.clone(),
            })
            .collect();

        let saved = self.store.insert_test_cases(&inserts).await.map_err(|err| {
            warn!(error = %err, count = inserts.len(), "saving generated test cases failed");
            err
        })?;

        info!(count = saved.len(), category_id, "saved generated test cases");
        self.created = saved.clone();
        self.step = GeneratorStep::Created;
        Ok(saved)
    }

    /// Back to an empty Input step.
    pub fn reset(&mut self) {
        self.step = GeneratorStep::Input;
        self.items.clear();
        self.degraded = false;
        self.created.clear();
    }
}
