use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::profiles::profile::{Profile, ProfileUpdate};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>>;
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<Profile>>;
    async fn update_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> anyhow::Result<Option<Profile>>;
}
