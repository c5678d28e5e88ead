use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::profiles::get_by_username::GetProfileByUsername;
use crate::application::use_cases::profiles::update_own::UpdateOwnProfile;
use crate::bootstrap::app_context::AppContext;
use crate::domain::profiles::profile::{Profile, ProfileUpdate};
use crate::presentation::http::auth::{Bearer, active_user};
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::extract::{ApiJson, ApiPath};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfilePublic {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfilePublic {
    fn from(p: Profile) -> Self {
        ProfilePublic {
            id: p.id,
            user_id: p.user_id,
            full_name: p.full_name,
            phone_number: p.phone_number,
            bio: p.bio,
            image: p.image,
            username: p.username,
            email: p.email,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProfileUpdateBody {
    pub profile_update: ProfileUpdateRequest,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/profiles/me", put(update_own_profile))
        .route("/profiles/:username", get(get_profile_by_username))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/profiles/{username}", tag = "Profiles",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, body = ProfilePublic),
        (status = 404, body = ErrorBody)
    ))]
pub async fn get_profile_by_username(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<ProfilePublic>, ApiError> {
    active_user(&ctx, bearer).await?;
    let repo = ctx.profile_repo();
    let uc = GetProfileByUsername {
        repo: repo.as_ref(),
    };
    let profile = uc.execute(&username).await?;
    Ok(Json(profile.into()))
}

#[utoipa::path(put, path = "/api/profiles/me", tag = "Profiles", request_body = ProfileUpdateBody,
    responses(
        (status = 200, body = ProfilePublic),
        (status = 422, body = ErrorBody)
    ))]
pub async fn update_own_profile(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiJson(body): ApiJson<ProfileUpdateBody>,
) -> Result<Json<ProfilePublic>, ApiError> {
    let user = active_user(&ctx, bearer).await?;
    let repo = ctx.profile_repo();
    let uc = UpdateOwnProfile {
        repo: repo.as_ref(),
    };
    let req = body.profile_update;
    let update = ProfileUpdate {
        full_name: req.full_name,
        phone_number: req.phone_number,
        bio: req.bio,
        image: req.image,
    };
    let profile = uc.execute(user.id, &update).await?;
    Ok(Json(profile.into()))
}
