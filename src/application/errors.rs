use crate::application::ports::user_repository::UserWriteError;
use crate::domain::users::validation::ValidationError;

#[derive(thiserror::Error, Debug)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("User with email {0} already exists.")]
    EmailTaken(String),
    #[error("User with username {0} already exists.")]
    UsernameTaken(String),
    #[error("User with email {0} not found")]
    UserNotFound(String),
    #[error("{0}")]
    IncorrectPassword(&'static str),
    #[error("{0}")]
    InvalidUpdate(String),
    #[error("Cannot update role for a superuser")]
    ProtectedUser,
    #[error("No profile found with that username.")]
    ProfileNotFound,
    #[error("A request to reset your password already exists.")]
    AlreadyRequested,
    #[error("The given password reset request does not exist.")]
    RequestNotFound,
    #[error("The given notification does not exist.")]
    NotificationNotFound,
    #[error("repository failure")]
    Repository(#[from] anyhow::Error),
}

impl AccountError {
    pub const BOTH_PASSWORDS_REQUIRED: &'static str =
        "Both current and new passwords are required to update.";
    pub const WRONG_PASSWORD: &'static str = "Incorrect password.";

    /// Names the value that lost a uniqueness race.
    pub fn from_user_write(err: UserWriteError, email: &str, username: &str) -> Self {
        match err {
            UserWriteError::EmailTaken => AccountError::EmailTaken(email.to_string()),
            UserWriteError::UsernameTaken => AccountError::UsernameTaken(username.to_string()),
            UserWriteError::Repository(e) => AccountError::Repository(e),
        }
    }
}
