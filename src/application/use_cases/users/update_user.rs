use crate::application::dto::users::UserAccountDto;
use crate::application::errors::AccountError;
use crate::application::ports::profile_repository::ProfileRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::users::accounts::attach_profile;
use crate::domain::users::user::{CredentialsUpdate, User};
use crate::domain::users::validation::{validate_email, validate_password, validate_username};
use crate::infrastructure::crypto;

pub struct UpdateUser<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: ProfileRepository + ?Sized,
{
    pub users: &'a U,
    pub profiles: &'a P,
}

#[derive(Debug, Clone, Default)]
pub struct UserUpdateRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub old_password: Option<String>,
}

impl<'a, U, P> UpdateUser<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: ProfileRepository + ?Sized,
{
    pub async fn execute(
        &self,
        current: &User,
        req: &UserUpdateRequest,
    ) -> Result<UserAccountDto, AccountError> {
        let mut next = CredentialsUpdate {
            username: current.username.clone(),
            email: current.email.clone(),
            password_hash: current.password_hash.clone(),
        };

        match (&req.password, &req.old_password) {
            (Some(password), Some(old_password)) => {
                validate_password(password)?;
                if !crypto::verify_password(old_password, &current.password_hash) {
                    return Err(AccountError::IncorrectPassword(
                        AccountError::WRONG_PASSWORD,
                    ));
                }
                next.password_hash = crypto::hash_password(password)?;
            }
            (None, None) => {}
            _ => {
                return Err(AccountError::IncorrectPassword(
                    AccountError::BOTH_PASSWORDS_REQUIRED,
                ));
            }
        }

        if let Some(email) = req.email.as_ref().filter(|e| **e != current.email) {
            validate_email(email)?;
            if let Some(owner) = self.users.find_by_email(email).await? {
                if owner.id != current.id {
                    return Err(AccountError::EmailTaken(email.clone()));
                }
            }
            next.email = email.clone();
        }

        if let Some(username) = req.username.as_ref().filter(|u| **u != current.username) {
            validate_username(username)?;
            if let Some(owner) = self.users.find_by_username(username).await? {
                if owner.id != current.id {
                    return Err(AccountError::UsernameTaken(username.clone()));
                }
            }
            next.username = username.clone();
        }

        let updated = self
            .users
            .update_credentials(current.id, &next)
            .await
            .map_err(|e| AccountError::from_user_write(e, &next.email, &next.username))?
            .ok_or_else(|| AccountError::InvalidUpdate("Could not update user.".into()))?;
        tracing::info!(user_id = %updated.id, "user_credentials_updated");
        Ok(attach_profile(self.profiles, updated).await?)
    }
}
