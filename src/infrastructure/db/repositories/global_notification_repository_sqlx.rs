use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::global_notification_repository::GlobalNotificationRepository;
use crate::domain::notifications::notification::{
    FeedEventType, FeedItem, GlobalNotification, NewGlobalNotification,
};
use crate::domain::users::user::Role;
use crate::infrastructure::db::PgPool;

pub struct SqlxGlobalNotificationRepository {
    pub pool: PgPool,
}

impl SqlxGlobalNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_notification(r: &PgRow) -> anyhow::Result<GlobalNotification> {
    let receiver_role: String = r.get("receiver_role");
    Ok(GlobalNotification {
        id: r.get("id"),
        sender: r.get("sender"),
        receiver_role: receiver_role.parse::<Role>()?,
        title: r.get("title"),
        body: r.get("body"),
        label: r.get("label"),
        link: r.get("link"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

fn role_names(roles: &[Role]) -> Vec<String> {
    roles.iter().map(|r| r.as_str().to_string()).collect()
}

#[async_trait]
impl GlobalNotificationRepository for SqlxGlobalNotificationRepository {
    async fn create(&self, new: &NewGlobalNotification) -> anyhow::Result<GlobalNotification> {
        let row = sqlx::query(
            r#"INSERT INTO global_notifications (sender, receiver_role, title, body, label, link)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, sender, receiver_role, title, body, label, link, created_at, updated_at"#,
        )
        .bind(new.sender.as_deref())
        .bind(new.receiver_role.as_str())
        .bind(&new.title)
        .bind(&new.body)
        .bind(&new.label)
        .bind(new.link.as_deref())
        .fetch_one(&self.pool)
        .await?;
        map_notification(&row)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM global_notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn feed(
        &self,
        roles: &[Role],
        before: chrono::DateTime<chrono::Utc>,
        limit: i64,
    ) -> anyhow::Result<Vec<FeedItem>> {
        let rows = sqlx::query(
            r#"SELECT * FROM (
                   SELECT id, sender, receiver_role, title, body, label, link, created_at, updated_at,
                          'is_update'::text AS event_type, updated_at AS event_timestamp
                   FROM global_notifications
                   WHERE receiver_role = ANY($1)
                     AND updated_at < $2
                     AND updated_at <> created_at
                   UNION ALL
                   SELECT id, sender, receiver_role, title, body, label, link, created_at, updated_at,
                          'is_create'::text AS event_type, created_at AS event_timestamp
                   FROM global_notifications
                   WHERE receiver_role = ANY($1)
                     AND created_at < $2
               ) AS events
               ORDER BY event_timestamp DESC
               LIMIT $3"#,
        )
        .bind(role_names(roles))
        .bind(before)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for r in rows.iter() {
            let kind: String = r.get("event_type");
            let event_type = FeedEventType::parse(&kind)
                .ok_or_else(|| anyhow::anyhow!("unknown feed event type: {kind}"))?;
            items.push(FeedItem {
                notification: map_notification(r)?,
                event_type,
                event_timestamp: r.get("event_timestamp"),
            });
        }
        Ok(items)
    }

    async fn has_new(
        &self,
        roles: &[Role],
        since: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<bool> {
        let row = sqlx::query(
            r#"SELECT EXISTS(
                   SELECT 1 FROM global_notifications
                   WHERE receiver_role = ANY($1) AND updated_at > $2
               ) AS has_new"#,
        )
        .bind(role_names(roles))
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("has_new"))
    }
}
