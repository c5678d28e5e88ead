use crate::application::errors::AccountError;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::tokens::{TokenSettings, create_access_token_for_user};
use crate::infrastructure::crypto;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
    pub tokens: &'a TokenSettings,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// Returns an access token, or `None` for an unknown email or wrong password.
    pub async fn execute(&self, req: &LoginRequest) -> Result<Option<String>, AccountError> {
        let Some(user) = self.repo.find_by_email(&req.email).await? else {
            return Ok(None);
        };
        if !crypto::verify_password(&req.password, &user.password_hash) {
            return Ok(None);
        }
        let token =
            create_access_token_for_user(&user, self.tokens).map_err(anyhow::Error::from)?;
        Ok(Some(token))
    }
}
