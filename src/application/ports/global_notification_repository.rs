use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::notifications::notification::{
    FeedItem, GlobalNotification, NewGlobalNotification,
};
use crate::domain::users::user::Role;

#[async_trait]
pub trait GlobalNotificationRepository: Send + Sync {
    async fn create(&self, new: &NewGlobalNotification) -> anyhow::Result<GlobalNotification>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Newest-first events strictly older than `before`, at most `limit` of them.
    async fn feed(
        &self,
        roles: &[Role],
        before: chrono::DateTime<chrono::Utc>,
        limit: i64,
    ) -> anyhow::Result<Vec<FeedItem>>;
    async fn has_new(
        &self,
        roles: &[Role],
        since: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<bool>;
}
