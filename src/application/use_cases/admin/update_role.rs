use crate::application::errors::AccountError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::Role;

pub struct UpdateUserRole<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
    /// Superuser roles are frozen in production.
    pub protect_superusers: bool,
}

impl<'a, R: UserRepository + ?Sized> UpdateUserRole<'a, R> {
    pub async fn execute(&self, email: &str, role: Role) -> Result<(), AccountError> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AccountError::UserNotFound(email.to_string()))?;
        if user.is_superuser && self.protect_superusers {
            return Err(AccountError::ProtectedUser);
        }
        if !self.repo.update_role(user.id, role).await? {
            return Err(AccountError::UserNotFound(email.to_string()));
        }
        tracing::info!(user_id = %user.id, role = %role, "user_role_updated");
        Ok(())
    }
}
