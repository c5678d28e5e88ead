use crate::application::errors::AccountError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct VerifyUsers<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> VerifyUsers<'a, R> {
    pub async fn execute(&self, emails: &[String]) -> Result<Vec<User>, AccountError> {
        let verified = self
            .repo
            .verify_by_emails(emails)
            .await?
            .ok_or_else(|| AccountError::InvalidUpdate("Could not verify all users.".into()))?;
        tracing::info!(count = verified.len(), "users_verified");
        Ok(verified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryStore;
    use crate::domain::users::user::Role;

    #[tokio::test]
    async fn all_or_nothing() {
        let store = InMemoryStore::new();
        let a = store
            .seed_user("lea", "lea@example.com", "lealealea", Role::User, false)
            .await;
        let uc = VerifyUsers { repo: &store };

        let res = uc
            .execute(&["lea@example.com".to_string(), "missing@example.com".to_string()])
            .await;
        assert!(matches!(res, Err(AccountError::InvalidUpdate(_))));
        assert!(!store.user(a.id).unwrap().is_verified);

        let ok = uc.execute(&["lea@example.com".to_string()]).await.unwrap();
        assert_eq!(ok.len(), 1);
        assert!(store.user(a.id).unwrap().is_verified);
    }
}
