use crate::application::dto::users::RegisteredUserDto;
use crate::application::errors::AccountError;
use crate::application::ports::profile_repository::ProfileRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::tokens::{TokenSettings, create_access_token_for_user};
use crate::application::use_cases::users::accounts::attach_profile;
use crate::domain::users::user::NewUser;
use crate::domain::users::validation::{validate_email, validate_password, validate_username};
use crate::infrastructure::crypto;

pub struct Register<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: ProfileRepository + ?Sized,
{
    pub users: &'a U,
    pub profiles: &'a P,
    pub tokens: &'a TokenSettings,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl<'a, U, P> Register<'a, U, P>
where
    U: UserRepository + ?Sized,
    P: ProfileRepository + ?Sized,
{
    pub async fn execute(&self, req: &RegisterRequest) -> Result<RegisteredUserDto, AccountError> {
        validate_email(&req.email)?;
        validate_username(&req.username)?;
        validate_password(&req.password)?;

        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(AccountError::EmailTaken(req.email.clone()));
        }
        if self.users.find_by_username(&req.username).await?.is_some() {
            return Err(AccountError::UsernameTaken(req.username.clone()));
        }

        let hash = crypto::hash_password(&req.password)?;
        let user = self
            .users
            .create_user(&NewUser::regular(
                req.username.clone(),
                req.email.clone(),
                hash,
            ))
            .await
            .map_err(|e| AccountError::from_user_write(e, &req.email, &req.username))?;
        tracing::info!(user_id = %user.id, username = %user.username, "user_registered");

        let access_token =
            create_access_token_for_user(&user, self.tokens).map_err(anyhow::Error::from)?;
        let account = attach_profile(self.profiles, user).await?;
        Ok(RegisteredUserDto {
            account,
            access_token,
        })
    }
}
