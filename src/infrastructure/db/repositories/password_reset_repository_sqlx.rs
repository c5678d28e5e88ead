use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::password_reset_repository::PasswordResetRepository;
use crate::domain::password_resets::request::PasswordResetRequest;
use crate::infrastructure::db::{PgPool, is_unique_violation};

pub struct SqlxPasswordResetRepository {
    pub pool: PgPool,
}

impl SqlxPasswordResetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_request(r: &PgRow) -> PasswordResetRequest {
    PasswordResetRequest {
        id: r.get("id"),
        email: r.get("email"),
        message: r.get("message"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl PasswordResetRepository for SqlxPasswordResetRepository {
    async fn create(
        &self,
        email: &str,
        message: &str,
    ) -> anyhow::Result<Option<PasswordResetRequest>> {
        let res = sqlx::query(
            r#"INSERT INTO password_reset_requests (email, message) VALUES ($1, $2)
               RETURNING id, email, message, created_at, updated_at"#,
        )
        .bind(email)
        .bind(message)
        .fetch_one(&self.pool)
        .await;
        match res {
            Ok(row) => Ok(Some(map_request(&row))),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> anyhow::Result<Vec<PasswordResetRequest>> {
        let rows = sqlx::query(
            r#"SELECT id, email, message, created_at, updated_at
               FROM password_reset_requests ORDER BY created_at"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_request).collect())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM password_reset_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
