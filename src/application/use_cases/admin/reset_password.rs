use crate::application::errors::AccountError;
use crate::application::ports::user_repository::UserRepository;
use crate::infrastructure::crypto;

pub struct ResetUserPassword<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ResetUserPassword<'a, R> {
    /// Returns the generated plain-text password. It is not stored anywhere.
    pub async fn execute(&self, email: &str) -> Result<String, AccountError> {
        let password = crypto::generate_password();
        let hash = crypto::hash_password(&password)?;
        if !self.repo.reset_password_by_email(email, &hash).await? {
            return Err(AccountError::UserNotFound(email.to_string()));
        }
        tracing::info!(email = %email, "password_reset_by_admin");
        Ok(password)
    }
}
