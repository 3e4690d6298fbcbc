use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use crate::error::AppError;

use super::Storage;

pub struct SqliteStorage {
    db: SqlitePool,
}

impl SqliteStorage {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Opens the database at `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        // sqlite::memory: gives every connection its own database
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let db = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&db).await?;

        Ok(Self::new(db))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn get_entry(&self, key: &str) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM storage_entries WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await?;

        Ok(value)
    }

    async fn set_entry(&self, key: &str, value: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO storage_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.db)
        .await
        .map_err(|e| AppError::Persistence(format!("write to {} failed: {}", key, e)))?;

        Ok(())
    }

    async fn remove_entry(&self, key: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM storage_entries WHERE key = ?")
            .bind(key)
            .execute(&self.db)
            .await
            .map_err(|e| AppError::Persistence(format!("delete of {} failed: {}", key, e)))?;

        Ok(())
    }
}
