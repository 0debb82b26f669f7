//! SQLite-backed basket line storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use stockgate_domain::{BasketLine, BasketLineId, LineMode, ProductNumber};

use crate::infrastructure::ports::{BasketRepo, RepoError};

/// SQLite implementation for basket line storage.
///
/// Lines are never deleted; removal sets `mode = 1` and every read filters
/// on `mode != 1`.
pub struct SqliteBasketRepo {
    pool: SqlitePool,
}

impl SqliteBasketRepo {
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("basket", e))?;

        Self::with_pool(pool).await
    }

    /// Build on an already-connected pool and ensure the schema exists.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS basket_lines (
                id TEXT PRIMARY KEY,
                session_key TEXT NOT NULL,
                product_number TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                mode INTEGER NOT NULL DEFAULT 0,
                added_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("basket", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_basket_lines_scope
             ON basket_lines (session_key, product_number)",
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("basket", e))?;

        Ok(Self { pool })
    }

    #[cfg(test)]
    pub async fn in_memory() -> Result<Self, RepoError> {
        // One connection only: every pooled connection to :memory: would
        // otherwise open its own empty database.
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RepoError::database("basket", e))?;
        Self::with_pool(pool).await
    }

    fn row_to_line(row: &SqliteRow) -> Result<BasketLine, RepoError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| RepoError::database("row_to_line", e))?;
        let session_key: String = row
            .try_get("session_key")
            .map_err(|e| RepoError::database("row_to_line", e))?;
        let product_number: String = row
            .try_get("product_number")
            .map_err(|e| RepoError::database("row_to_line", e))?;
        let quantity: i64 = row
            .try_get("quantity")
            .map_err(|e| RepoError::database("row_to_line", e))?;
        let mode: i64 = row
            .try_get("mode")
            .map_err(|e| RepoError::database("row_to_line", e))?;
        let added_at: DateTime<Utc> = row
            .try_get("added_at")
            .map_err(|e| RepoError::database("row_to_line", e))?;

        let id = Uuid::parse_str(&id)
            .map(BasketLineId::from_uuid)
            .map_err(|e| RepoError::serialization(e))?;
        let product_number =
            ProductNumber::parse(product_number).map_err(|e| RepoError::serialization(e))?;
        let mode = LineMode::from_i64(mode).map_err(|e| RepoError::serialization(e))?;

        Ok(BasketLine {
            id,
            session_key,
            product_number,
            quantity,
            mode,
            added_at,
        })
    }
}

#[async_trait]
impl BasketRepo for SqliteBasketRepo {
    async fn held_quantity(
        &self,
        product_number: &str,
        session_key: &str,
    ) -> Result<i64, RepoError> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(quantity), 0) AS total
             FROM basket_lines
             WHERE product_number = ? AND session_key = ? AND mode != 1",
        )
        .bind(product_number)
        .bind(session_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::database("held_quantity", e))?;

        row.try_get("total")
            .map_err(|e| RepoError::database("held_quantity", e))
    }

    async fn find_active_line(
        &self,
        product_number: &ProductNumber,
        session_key: &str,
    ) -> Result<Option<BasketLine>, RepoError> {
        let row = sqlx::query(
            "SELECT id, session_key, product_number, quantity, mode, added_at
             FROM basket_lines
             WHERE product_number = ? AND session_key = ? AND mode != 1
             LIMIT 1",
        )
        .bind(product_number.as_str())
        .bind(session_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("find_active_line", e))?;

        row.as_ref().map(Self::row_to_line).transpose()
    }

    async fn insert_line(&self, line: &BasketLine) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO basket_lines (id, session_key, product_number, quantity, mode, added_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(line.id.to_string())
        .bind(&line.session_key)
        .bind(line.product_number.as_str())
        .bind(line.quantity)
        .bind(line.mode.as_i64())
        .bind(line.added_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("insert_line", e))?;

        Ok(())
    }

    async fn set_quantity(&self, id: BasketLineId, quantity: i64) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE basket_lines SET quantity = ? WHERE id = ?")
            .bind(quantity)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("set_quantity", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("BasketLine", id));
        }
        Ok(())
    }

    async fn list_lines(&self, session_key: &str) -> Result<Vec<BasketLine>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, session_key, product_number, quantity, mode, added_at
             FROM basket_lines
             WHERE session_key = ? AND mode != 1
             ORDER BY added_at ASC",
        )
        .bind(session_key)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_lines", e))?;

        rows.iter().map(Self::row_to_line).collect()
    }

    async fn mark_removed(&self, session_key: &str, id: BasketLineId) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE basket_lines SET mode = 1
             WHERE id = ? AND session_key = ? AND mode != 1",
        )
        .bind(id.to_string())
        .bind(session_key)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("mark_removed", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("BasketLine", id));
        }
        Ok(())
    }
}
