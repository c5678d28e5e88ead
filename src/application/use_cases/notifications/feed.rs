use chrono::{DateTime, Utc};

use crate::application::access::visible_roles;
use crate::application::errors::AccountError;
use crate::application::ports::global_notification_repository::GlobalNotificationRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::notifications::notification::FeedItem;
use crate::domain::users::user::User;
use crate::domain::users::validation::ValidationError;

pub const DEFAULT_PAGE_CHUNK_SIZE: i64 = 10;
pub const MAX_PAGE_CHUNK_SIZE: i64 = 50;

pub struct FetchNotificationFeed<'a, U, N>
where
    U: UserRepository + ?Sized,
    N: GlobalNotificationRepository + ?Sized,
{
    pub users: &'a U,
    pub notifications: &'a N,
}

#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    pub page_chunk_size: Option<i64>,
    /// Only events strictly older than this are returned. Defaults to now.
    pub starting_date: Option<DateTime<Utc>>,
}

impl<'a, U, N> FetchNotificationFeed<'a, U, N>
where
    U: UserRepository + ?Sized,
    N: GlobalNotificationRepository + ?Sized,
{
    pub async fn execute(
        &self,
        user: &User,
        query: &FeedQuery,
    ) -> Result<Vec<FeedItem>, AccountError> {
        let limit = query.page_chunk_size.unwrap_or(DEFAULT_PAGE_CHUNK_SIZE);
        if !(1..=MAX_PAGE_CHUNK_SIZE).contains(&limit) {
            return Err(ValidationError::new(
                "page_chunk_size",
                format!("must be between 1 and {MAX_PAGE_CHUNK_SIZE}"),
            )
            .into());
        }
        let now = Utc::now();
        let before = query.starting_date.unwrap_or(now);
        let roles = visible_roles(user.role);
        let items = self.notifications.feed(&roles, before, limit).await?;
        self.users.touch_last_notification_at(user.id, now).await?;
        tracing::debug!(user_id = %user.id, count = items.len(), "notification_feed_served");
        Ok(items)
    }
}
