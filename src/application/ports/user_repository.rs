use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::user::{CredentialsUpdate, NewUser, Role, User};

/// A write that collided with the unique `email` or `username` column.
#[derive(thiserror::Error, Debug)]
pub enum UserWriteError {
    #[error("email already in use")]
    EmailTaken,
    #[error("username already in use")]
    UsernameTaken,
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user together with an empty profile.
    async fn create_user(&self, new_user: &NewUser) -> Result<User, UserWriteError>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn update_credentials(
        &self,
        id: Uuid,
        update: &CredentialsUpdate,
    ) -> Result<Option<User>, UserWriteError>;
    /// `verified = None` lists everyone.
    async fn list_users(&self, verified: Option<bool>) -> anyhow::Result<Vec<User>>;
    /// Marks every email as verified, or none of them. Returns `None` when at
    /// least one email has no matching user.
    async fn verify_by_emails(&self, emails: &[String]) -> anyhow::Result<Option<Vec<User>>>;
    /// Replaces the password hash and drops any pending reset request for the email.
    async fn reset_password_by_email(
        &self,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<bool>;
    async fn update_role(&self, id: Uuid, role: Role) -> anyhow::Result<bool>;
    async fn touch_last_notification_at(
        &self,
        id: Uuid,
        at: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<()>;
}
