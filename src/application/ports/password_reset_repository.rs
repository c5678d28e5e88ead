use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::password_resets::request::PasswordResetRequest;

#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    /// Returns `None` if a request for this email already exists.
    async fn create(
        &self,
        email: &str,
        message: &str,
    ) -> anyhow::Result<Option<PasswordResetRequest>>;
    async fn list(&self) -> anyhow::Result<Vec<PasswordResetRequest>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
