use crate::application::access::visible_roles;
use crate::application::ports::global_notification_repository::GlobalNotificationRepository;
use crate::domain::users::user::User;

pub struct HasNewNotifications<'a, R: GlobalNotificationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: GlobalNotificationRepository + ?Sized> HasNewNotifications<'a, R> {
    /// Anything created or edited since the user last read the feed.
    pub async fn execute(&self, user: &User) -> anyhow::Result<bool> {
        self.repo
            .has_new(&visible_roles(user.role), user.last_notification_at)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryStore;
    use crate::domain::notifications::notification::NewGlobalNotification;
    use crate::domain::users::user::Role;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn compares_against_last_read() {
        let store = InMemoryStore::new();
        let mut user = store
            .seed_user("sam", "sam@example.com", "samsamsamsam", Role::User, true)
            .await;
        user.last_notification_at = Utc::now() - Duration::minutes(5);
        let uc = HasNewNotifications { repo: &store };
        assert!(!uc.execute(&user).await.unwrap());

        let n = GlobalNotificationRepository::create(
            &store,
            &NewGlobalNotification {
                sender: None,
                receiver_role: Role::Admin,
                title: "admins only".into(),
                body: "b".into(),
                label: "l".into(),
                link: None,
            },
        )
        .await
        .unwrap();
        assert!(!uc.execute(&user).await.unwrap());

        store.edit_notification(n.id, "admins only", Utc::now());
        assert!(!uc.execute(&user).await.unwrap());

        GlobalNotificationRepository::create(
            &store,
            &NewGlobalNotification {
                sender: None,
                receiver_role: Role::User,
                title: "everyone".into(),
                body: "b".into(),
                label: "l".into(),
                link: None,
            },
        )
        .await
        .unwrap();
        assert!(uc.execute(&user).await.unwrap());
    }
}
