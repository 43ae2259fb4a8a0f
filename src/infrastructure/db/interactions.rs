use crate::domain::error::{AppError, Result};
use crate::domain::interaction::InteractionLogEntry;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

/// Append-only sink for AI interaction records.
#[async_trait]
pub trait InteractionLog {
    async fn append(&self, entry: &InteractionLogEntry) -> Result<()>;
}

pub struct InteractionRepository {
    pool: SqlitePool,
}

impl InteractionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InteractionLog for InteractionRepository {
    async fn append(&self, entry: &InteractionLogEntry) -> Result<()> {
        sqlx::query(
            "INSERT INTO ai_interactions (id, user_id, message, response, context_type, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.message)
        .bind(&entry.response)
        .bind(entry.context_type.as_str())
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert interaction: {e}")))?;

        Ok(())
    }
}
