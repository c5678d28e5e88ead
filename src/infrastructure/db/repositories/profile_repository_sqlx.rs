use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::profile_repository::ProfileRepository;
use crate::domain::profiles::profile::{Profile, ProfileUpdate};
use crate::infrastructure::db::PgPool;

pub struct SqlxProfileRepository {
    pub pool: PgPool,
}

impl SqlxProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_profile(r: &PgRow) -> Profile {
    Profile {
        id: r.get("id"),
        user_id: r.get("user_id"),
        full_name: r.get("full_name"),
        phone_number: r.get("phone_number"),
        bio: r.get("bio"),
        image: r.get("image"),
        username: r.try_get("username").ok(),
        email: r.try_get("email").ok(),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query(
            r#"SELECT p.id, p.user_id, p.full_name, p.phone_number, p.bio, p.image,
                      p.created_at, p.updated_at, u.username, u.email
               FROM profiles p
               JOIN users u ON u.id = p.user_id
               WHERE p.user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_profile))
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query(
            r#"SELECT p.id, p.user_id, p.full_name, p.phone_number, p.bio, p.image,
                      p.created_at, p.updated_at, u.username, u.email
               FROM profiles p
               JOIN users u ON u.id = p.user_id
               WHERE u.username = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_profile))
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query(
            r#"WITH updated AS (
                   UPDATE profiles SET
                       full_name = COALESCE($2, full_name),
                       phone_number = COALESCE($3, phone_number),
                       bio = COALESCE($4, bio),
                       image = COALESCE($5, image)
                   WHERE user_id = $1
                   RETURNING *
               )
               SELECT p.id, p.user_id, p.full_name, p.phone_number, p.bio, p.image,
                      p.created_at, p.updated_at, u.username, u.email
               FROM updated p
               JOIN users u ON u.id = p.user_id"#,
        )
        .bind(user_id)
        .bind(update.full_name.as_deref())
        .bind(update.phone_number.as_deref())
        .bind(update.bio.as_deref())
        .bind(update.image.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_profile))
    }
}
