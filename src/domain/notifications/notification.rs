use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::users::user::Role;

#[derive(Debug, Clone)]
pub struct GlobalNotification {
    pub id: Uuid,
    pub sender: Option<String>,
    pub receiver_role: Role,
    pub title: String,
    pub body: String,
    pub label: String,
    pub link: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewGlobalNotification {
    pub sender: Option<String>,
    pub receiver_role: Role,
    pub title: String,
    pub body: String,
    pub label: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedEventType {
    IsCreate,
    IsUpdate,
}

impl FeedEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedEventType::IsCreate => "is_create",
            FeedEventType::IsUpdate => "is_update",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "is_create" => Some(FeedEventType::IsCreate),
            "is_update" => Some(FeedEventType::IsUpdate),
            _ => None,
        }
    }
}

/// A notification as it appears in a feed page. Edited notifications show up
/// a second time as an `IsUpdate` event stamped with `updated_at`.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub notification: GlobalNotification,
    pub event_type: FeedEventType,
    pub event_timestamp: chrono::DateTime<chrono::Utc>,
}
