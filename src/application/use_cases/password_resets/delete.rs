use uuid::Uuid;

use crate::application::errors::AccountError;
use crate::application::ports::password_reset_repository::PasswordResetRepository;

pub struct DeletePasswordResetRequest<'a, R: PasswordResetRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PasswordResetRepository + ?Sized> DeletePasswordResetRequest<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), AccountError> {
        if !self.repo.delete(id).await? {
            return Err(AccountError::RequestNotFound);
        }
        tracing::info!(request_id = %id, "password_reset_request_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryStore;
    use crate::application::use_cases::password_resets::list::ListPasswordResetRequests;

    #[tokio::test]
    async fn deletes_existing_and_reports_unknown() {
        let store = InMemoryStore::new();
        let req = PasswordResetRepository::create(&store, "ivy@example.com", "please")
            .await
            .unwrap()
            .unwrap();
        let uc = DeletePasswordResetRequest { repo: &store };
        uc.execute(req.id).await.unwrap();
        assert!(
            ListPasswordResetRequests { repo: &store }
                .execute()
                .await
                .unwrap()
                .is_empty()
        );
        assert!(matches!(
            uc.execute(req.id).await,
            Err(AccountError::RequestNotFound)
        ));
    }
}
