use crate::application::errors::AccountError;
use crate::application::ports::password_reset_repository::PasswordResetRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::password_resets::request::PasswordResetRequest;
use crate::domain::users::validation::{validate_email, validate_reset_message};

pub struct RequestPasswordReset<'a, U, R>
where
    U: UserRepository + ?Sized,
    R: PasswordResetRepository + ?Sized,
{
    pub users: &'a U,
    pub resets: &'a R,
}

#[derive(Debug, Clone)]
pub struct PasswordResetInput {
    pub email: String,
    pub message: String,
}

impl<'a, U, R> RequestPasswordReset<'a, U, R>
where
    U: UserRepository + ?Sized,
    R: PasswordResetRepository + ?Sized,
{
    pub async fn execute(
        &self,
        input: &PasswordResetInput,
    ) -> Result<PasswordResetRequest, AccountError> {
        validate_email(&input.email)?;
        validate_reset_message(&input.message)?;
        if self.users.find_by_email(&input.email).await?.is_none() {
            return Err(AccountError::UserNotFound(input.email.clone()));
        }
        let created = self
            .resets
            .create(&input.email, input.message.trim())
            .await?
            .ok_or(AccountError::AlreadyRequested)?;
        tracing::info!(email = %created.email, "password_reset_requested");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryStore;
    use crate::domain::users::user::Role;

    fn input(email: &str) -> PasswordResetInput {
        PasswordResetInput {
            email: email.into(),
            message: "I forgot it".into(),
        }
    }

    #[tokio::test]
    async fn one_pending_request_per_email() {
        let store = InMemoryStore::new();
        store
            .seed_user("hal", "hal@example.com", "halhalhal", Role::User, true)
            .await;
        let uc = RequestPasswordReset {
            users: &store,
            resets: &store,
        };
        let req = uc.execute(&input("hal@example.com")).await.unwrap();
        assert_eq!(req.email, "hal@example.com");
        assert_eq!(req.message, "I forgot it");
        assert!(matches!(
            uc.execute(&input("hal@example.com")).await,
            Err(AccountError::AlreadyRequested)
        ));
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let store = InMemoryStore::new();
        let uc = RequestPasswordReset {
            users: &store,
            resets: &store,
        };
        assert!(matches!(
            uc.execute(&input("nobody@example.com")).await,
            Err(AccountError::UserNotFound(_))
        ));
        assert_eq!(store.reset_count(), 0);
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let store = InMemoryStore::new();
        store
            .seed_user("hal", "hal@example.com", "halhalhal", Role::User, true)
            .await;
        let uc = RequestPasswordReset {
            users: &store,
            resets: &store,
        };
        let res = uc
            .execute(&PasswordResetInput {
                email: "hal@example.com".into(),
                message: "   ".into(),
            })
            .await;
        assert!(matches!(res, Err(AccountError::Validation(_))));
    }
}
