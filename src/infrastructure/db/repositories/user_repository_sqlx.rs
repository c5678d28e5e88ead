use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::{UserRepository, UserWriteError};
use crate::domain::users::user::{CredentialsUpdate, NewUser, Role, User};
use crate::infrastructure::db::{PgPool, unique_violation_constraint};

const USER_COLUMNS: &str = "id, username, email, role, is_verified, password, is_active, \
     is_superuser, last_notification_at, created_at, updated_at";

const USERS_EMAIL_KEY: &str = "users_email_key";
const USERS_USERNAME_KEY: &str = "users_username_key";

impl From<sqlx::Error> for UserWriteError {
    fn from(err: sqlx::Error) -> Self {
        match unique_violation_constraint(&err) {
            Some(USERS_EMAIL_KEY) => UserWriteError::EmailTaken,
            Some(USERS_USERNAME_KEY) => UserWriteError::UsernameTaken,
            _ => UserWriteError::Repository(err.into()),
        }
    }
}

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(r: &PgRow) -> anyhow::Result<User> {
    let role: String = r.get("role");
    Ok(User {
        id: r.get("id"),
        username: r.get("username"),
        email: r.get("email"),
        role: role.parse::<Role>()?,
        is_verified: r.get("is_verified"),
        password_hash: r.get("password"),
        is_active: r.get("is_active"),
        is_superuser: r.get("is_superuser"),
        last_notification_at: r.get("last_notification_at"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, new_user: &NewUser) -> Result<User, UserWriteError> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(&format!(
            "INSERT INTO users (username, email, password, role, is_verified, is_superuser)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role.as_str())
        .bind(new_user.is_verified)
        .bind(new_user.is_superuser)
        .fetch_one(&mut *tx)
        .await?;
        let user = map_user(&row)?;
        sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_user).transpose()
    }

    async fn update_credentials(
        &self,
        id: Uuid,
        update: &CredentialsUpdate,
    ) -> Result<Option<User>, UserWriteError> {
        let row = sqlx::query(&format!(
            "UPDATE users SET username = $2, email = $3, password = $4
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(&update.username)
        .bind(&update.email)
        .bind(&update.password_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_user).transpose()?)
    }

    async fn list_users(&self, verified: Option<bool>) -> anyhow::Result<Vec<User>> {
        let rows = match verified {
            Some(flag) => {
                sqlx::query(&format!(
                    "SELECT {USER_COLUMNS} FROM users WHERE is_verified = $1 ORDER BY created_at"
                ))
                .bind(flag)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        rows.iter().map(map_user).collect()
    }

    async fn verify_by_emails(&self, emails: &[String]) -> anyhow::Result<Option<Vec<User>>> {
        let mut wanted: Vec<String> = emails.to_vec();
        wanted.sort();
        wanted.dedup();

        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query(&format!(
            "UPDATE users SET is_verified = TRUE
             WHERE email = ANY($1)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&wanted)
        .fetch_all(&mut *tx)
        .await?;
        if rows.len() != wanted.len() {
            tx.rollback().await?;
            return Ok(None);
        }
        tx.commit().await?;
        rows.iter().map(map_user).collect::<anyhow::Result<Vec<_>>>().map(Some)
    }

    async fn reset_password_by_email(
        &self,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query("UPDATE users SET password = $2 WHERE email = $1")
            .bind(email)
            .bind(password_hash)
            .execute(&mut *tx)
            .await?;
        if res.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }
        sqlx::query("DELETE FROM password_reset_requests WHERE email = $1")
            .bind(email)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn update_role(&self, id: Uuid, role: Role) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(id)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn touch_last_notification_at(
        &self,
        id: Uuid,
        at: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET last_notification_at = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser::regular(username.into(), email.into(), "$2b$04$placeholder".into())
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn create_user_adds_profile_and_names_unique_conflicts(
        pool: PgPool,
    ) -> anyhow::Result<()> {
        let repo = SqlxUserRepository::new(pool.clone());
        let ann = repo.create_user(&new_user("ann", "ann@example.com")).await?;
        let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE user_id = $1")
            .bind(ann.id)
            .fetch_one(&pool)
            .await?;
        assert_eq!(profiles, 1);

        assert!(matches!(
            repo.create_user(&new_user("ann2", "ann@example.com")).await,
            Err(UserWriteError::EmailTaken)
        ));
        assert!(matches!(
            repo.create_user(&new_user("ann", "other@example.com")).await,
            Err(UserWriteError::UsernameTaken)
        ));
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await?;
        assert_eq!(users, 1);

        let bob = repo.create_user(&new_user("bob", "bob@example.com")).await?;
        let update = CredentialsUpdate {
            username: bob.username.clone(),
            email: "ann@example.com".into(),
            password_hash: bob.password_hash.clone(),
        };
        assert!(matches!(
            repo.update_credentials(bob.id, &update).await,
            Err(UserWriteError::EmailTaken)
        ));
        Ok(())
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn verify_by_emails_is_all_or_nothing(pool: PgPool) -> anyhow::Result<()> {
        let repo = SqlxUserRepository::new(pool);
        repo.create_user(&new_user("ann", "ann@example.com")).await?;
        repo.create_user(&new_user("bob", "bob@example.com")).await?;

        let partial = vec!["ann@example.com".to_string(), "ghost@example.com".to_string()];
        assert!(repo.verify_by_emails(&partial).await?.is_none());
        assert!(repo.list_users(Some(true)).await?.is_empty());

        let both = vec![
            "ann@example.com".to_string(),
            "bob@example.com".to_string(),
            "ann@example.com".to_string(),
        ];
        let verified = repo.verify_by_emails(&both).await?.unwrap();
        assert_eq!(verified.len(), 2);
        assert!(repo.list_users(Some(false)).await?.is_empty());
        Ok(())
    }
}
