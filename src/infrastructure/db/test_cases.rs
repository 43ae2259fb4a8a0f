use crate::domain::error::{AppError, Result};
use crate::domain::test_case::{Category, NewTestCase, NormalizedTestCase, PersistedTestCase};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use tracing::info;
use validator::Validate;

/// Persistence for categories and accepted test cases.
#[async_trait]
pub trait TestCaseStore {
    async fn find_category_by_name(&self, user_id: &str, name: &str) -> Result<Option<Category>>;

    async fn create_category(&self, user_id: &str, name: &str) -> Result<Category>;

    /// Inserts every item or none of them.
    async fn insert_test_cases(&self, items: &[NewTestCase]) -> Result<Vec<PersistedTestCase>>;

    async fn list_test_cases(&self, user_id: &str) -> Result<Vec<PersistedTestCase>>;
}

pub struct TestCaseRepository {
    pool: SqlitePool,
}

impl TestCaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    user_id: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TestCaseRow {
    id: i64,
    user_id: String,
    category_id: i64,
    name: String,
    description: String,
    scenarios_json: String,
    tags_json: String,
    category_label: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<TestCaseRow> for PersistedTestCase {
    type Error = AppError;

    fn try_from(row: TestCaseRow) -> Result<Self> {
        let scenarios: Vec<String> = serde_json::from_str(&row.scenarios_json).map_err(|e| {
            AppError::DatabaseError(format!("Corrupt scenarios for test case {}: {e}", row.id))
        })?;
        let tags: Vec<String> = serde_json::from_str(&row.tags_json).map_err(|e| {
            AppError::DatabaseError(format!("Corrupt tags for test case {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            category_id: row.category_id,
            test_case: NormalizedTestCase {
                name: row.name,
                description: row.description,
                scenarios,
                category: row.category_label,
                tags,
            },
            created_at: row.created_at,
        })
    }
}

fn to_json(values: &[String]) -> Result<String> {
    serde_json::to_string(values)
        .map_err(|e| AppError::Internal(format!("Failed to encode list: {e}")))
}

#[async_trait]
impl TestCaseStore for TestCaseRepository {
    async fn find_category_by_name(&self, user_id: &str, name: &str) -> Result<Option<Category>> {
        sqlx::query_as::<_, CategoryRow>(
            "SELECT id, user_id, name, created_at FROM categories WHERE user_id = ? AND name = ?",
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to look up category: {e}")))
        .map(|row| row.map(Category::from))
    }

    async fn create_category(&self, user_id: &str, name: &str) -> Result<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Category name must not be empty".to_string(),
            ));
        }

        let created_at = Utc::now();
        let result = sqlx::query("INSERT INTO categories (user_id, name, created_at) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(name)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to create category: {e}")))?;

        Ok(Category {
            id: result.last_insert_rowid(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            created_at,
        })
    }

    async fn insert_test_cases(&self, items: &[NewTestCase]) -> Result<Vec<PersistedTestCase>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        for item in items {
            item.validate()?;
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {e}")))?;

        let mut persisted = Vec::with_capacity(items.len());
        for item in items {
            let owned: Option<i64> =
                sqlx::query_scalar("SELECT id FROM categories WHERE id = ? AND user_id = ?")
                    .bind(item.category_id)
                    .bind(&item.user_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::DatabaseError(format!("Failed to look up category: {e}"))
                    })?;
            if owned.is_none() {
                return Err(AppError::ValidationError(format!(
                    "Category {} not found",
                    item.category_id
                )));
            }

            let created_at = Utc::now();
            let case = &item.test_case;
            let result = sqlx::query(
                "INSERT INTO test_cases (user_id, category_id, name, description, scenarios_json, tags_json, category_label, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&item.user_id)
            .bind(item.category_id)
            .bind(&case.name)
            .bind(&case.description)
            .bind(to_json(&case.scenarios)?)
            .bind(to_json(&case.tags)?)
            .bind(&case.category)
            .bind(created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert test case: {e}")))?;

            persisted.push(PersistedTestCase {
                id: result.last_insert_rowid(),
                user_id: item.user_id.clone(),
                category_id: item.category_id,
                test_case: case.clone(),
                created_at,
            });
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit test cases: {e}")))?;

        info!(count = persisted.len(), "test cases saved");
        Ok(persisted)
    }

    async fn list_test_cases(&self, user_id: &str) -> Result<Vec<PersistedTestCase>> {
        let rows = sqlx::query_as::<_, TestCaseRow>(
            "SELECT id, user_id, category_id, name, description, scenarios_json, tags_json, category_label, created_at
             FROM test_cases WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list test cases: {e}")))?;

        rows.into_iter().map(PersistedTestCase::try_from).collect()
    }
}
