use crate::application::errors::AccountError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{NewUser, User};
use crate::domain::users::validation::{validate_email, validate_password, validate_username};
use crate::infrastructure::crypto;

/// Creates the initial administrator on startup unless the email is already registered.
pub struct BootstrapAdmin<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> BootstrapAdmin<'a, R> {
    pub async fn execute(&self, seed: &AdminSeed) -> Result<Option<User>, AccountError> {
        validate_email(&seed.email)?;
        validate_username(&seed.username)?;
        validate_password(&seed.password)?;

        if self.repo.find_by_email(&seed.email).await?.is_some() {
            return Ok(None);
        }
        if self.repo.find_by_username(&seed.username).await?.is_some() {
            return Err(AccountError::UsernameTaken(seed.username.clone()));
        }
        let hash = crypto::hash_password(&seed.password)?;
        let user = self
            .repo
            .create_user(&NewUser::admin(
                seed.username.clone(),
                seed.email.clone(),
                hash,
            ))
            .await
            .map_err(|e| AccountError::from_user_write(e, &seed.email, &seed.username))?;
        tracing::warn!(email = %user.email, "created bootstrap admin user");
        Ok(Some(user))
    }
}
