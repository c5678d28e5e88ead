use uuid::Uuid;

use crate::application::errors::AccountError;
use crate::application::ports::global_notification_repository::GlobalNotificationRepository;

pub struct DeleteGlobalNotification<'a, R: GlobalNotificationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: GlobalNotificationRepository + ?Sized> DeleteGlobalNotification<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), AccountError> {
        if !self.repo.delete(id).await? {
            return Err(AccountError::NotificationNotFound);
        }
        tracing::info!(notification_id = %id, "global_notification_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryStore;
    use crate::domain::notifications::notification::NewGlobalNotification;
    use crate::domain::users::user::Role;

    #[tokio::test]
    async fn deletes_once() {
        let store = InMemoryStore::new();
        let n = GlobalNotificationRepository::create(
            &store,
            &NewGlobalNotification {
                sender: None,
                receiver_role: Role::User,
                title: "t".into(),
                body: "b".into(),
                label: "l".into(),
                link: None,
            },
        )
        .await
        .unwrap();
        let uc = DeleteGlobalNotification { repo: &store };
        uc.execute(n.id).await.unwrap();
        assert!(matches!(
            uc.execute(n.id).await,
            Err(AccountError::NotificationNotFound)
        ));
    }
}
