use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::dto::users::UserAccountDto;
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::notifications::feed::{FeedQuery, FetchNotificationFeed};
use crate::application::use_cases::notifications::has_new::HasNewNotifications;
use crate::application::use_cases::password_resets::request::{
    PasswordResetInput, RequestPasswordReset,
};
use crate::application::use_cases::users::update_user::{UpdateUser, UserUpdateRequest};
use crate::bootstrap::app_context::AppContext;
use crate::domain::notifications::notification::{FeedEventType, FeedItem};
use crate::domain::password_resets::request::PasswordResetRequest;
use crate::domain::users::user::{Role, User};
use crate::presentation::http::auth::{
    AccessToken, Bearer, NOT_AUTHENTICATED, active_user, verified_user,
};
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::extract::{ApiJson, ApiQuery};
use crate::presentation::http::profiles::ProfilePublic;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserPublic {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub is_verified: bool,
    pub is_active: bool,
    pub is_superuser: bool,
    pub last_notification_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub access_token: Option<AccessToken>,
    pub profile: Option<ProfilePublic>,
}

impl From<User> for UserPublic {
    fn from(u: User) -> Self {
        UserPublic {
            id: u.id,
            email: u.email,
            username: u.username,
            role: u.role,
            is_verified: u.is_verified,
            is_active: u.is_active,
            is_superuser: u.is_superuser,
            last_notification_at: u.last_notification_at,
            created_at: u.created_at,
            updated_at: u.updated_at,
            access_token: None,
            profile: None,
        }
    }
}

impl From<UserAccountDto> for UserPublic {
    fn from(d: UserAccountDto) -> Self {
        let mut public = UserPublic::from(d.user);
        public.profile = d.profile.map(Into::into);
        public
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub old_password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserUpdateBody {
    pub user_update: UserUpdate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordResetRequestCreate {
    pub email: String,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordResetBody {
    pub password_request: PasswordResetRequestCreate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PasswordResetRequestPublic {
    pub id: Uuid,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PasswordResetRequest> for PasswordResetRequestPublic {
    fn from(r: PasswordResetRequest) -> Self {
        PasswordResetRequestPublic {
            id: r.id,
            email: r.email,
            message: r.message,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedParams {
    /// Page size, 1 to 50. Defaults to 10.
    pub page_chunk_size: Option<i64>,
    /// Only events older than this timestamp are returned.
    pub starting_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GlobalNotificationFeedItem {
    pub id: Uuid,
    pub sender: Option<String>,
    pub receiver_role: Role,
    pub title: String,
    pub body: String,
    pub label: String,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub event_type: FeedEventType,
    pub event_timestamp: DateTime<Utc>,
    /// 1-based position within the page.
    pub row_number: i64,
}

impl GlobalNotificationFeedItem {
    fn from_item(item: FeedItem, row_number: i64) -> Self {
        let n = item.notification;
        GlobalNotificationFeedItem {
            id: n.id,
            sender: n.sender,
            receiver_role: n.receiver_role,
            title: n.title,
            body: n.body,
            label: n.label,
            link: n.link,
            created_at: n.created_at,
            updated_at: n.updated_at,
            event_type: item.event_type,
            event_timestamp: item.event_timestamp,
            row_number,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HasNewResponse {
    pub has_new: bool,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users/me", get(get_me).put(update_me))
        .route("/users/request-password-reset", post(request_password_reset))
        .route("/users/notifications", get(notification_feed))
        .route("/users/notifications/has-new", get(has_new_notifications))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/users/me", tag = "Users", responses(
    (status = 200, body = UserPublic),
    (status = 401, body = ErrorBody),
    (status = 403, body = ErrorBody)
))]
pub async fn get_me(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<UserPublic>, ApiError> {
    let user = verified_user(&ctx, bearer).await?;
    let users = ctx.user_repo();
    let profiles = ctx.profile_repo();
    let uc = GetMe {
        users: users.as_ref(),
        profiles: profiles.as_ref(),
    };
    let account = uc
        .execute(user.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized(NOT_AUTHENTICATED))?;
    Ok(Json(account.into()))
}

#[utoipa::path(put, path = "/api/users/me", tag = "Users", request_body = UserUpdateBody, responses(
    (status = 200, body = UserPublic),
    (status = 400, body = ErrorBody),
    (status = 409, body = ErrorBody)
))]
pub async fn update_me(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiJson(body): ApiJson<UserUpdateBody>,
) -> Result<Json<UserPublic>, ApiError> {
    let user = verified_user(&ctx, bearer).await?;
    let users = ctx.user_repo();
    let profiles = ctx.profile_repo();
    let uc = UpdateUser {
        users: users.as_ref(),
        profiles: profiles.as_ref(),
    };
    let update = body.user_update;
    let req = UserUpdateRequest {
        email: update.email,
        username: update.username,
        password: update.password,
        old_password: update.old_password,
    };
    let account = uc.execute(&user, &req).await?;
    Ok(Json(account.into()))
}

#[utoipa::path(post, path = "/api/users/request-password-reset", tag = "Users",
    request_body = PasswordResetBody, security(()),
    responses(
        (status = 200, body = PasswordResetRequestPublic),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody)
    ))]
pub async fn request_password_reset(
    State(ctx): State<AppContext>,
    ApiJson(body): ApiJson<PasswordResetBody>,
) -> Result<Json<PasswordResetRequestPublic>, ApiError> {
    let users = ctx.user_repo();
    let resets = ctx.password_reset_repo();
    let uc = RequestPasswordReset {
        users: users.as_ref(),
        resets: resets.as_ref(),
    };
    let input = PasswordResetInput {
        email: body.password_request.email,
        message: body.password_request.message,
    };
    let created = uc.execute(&input).await?;
    Ok(Json(created.into()))
}

#[utoipa::path(get, path = "/api/users/notifications", tag = "Notifications",
    params(FeedParams),
    responses((status = 200, body = [GlobalNotificationFeedItem])))]
pub async fn notification_feed(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiQuery(params): ApiQuery<FeedParams>,
) -> Result<Json<Vec<GlobalNotificationFeedItem>>, ApiError> {
    let user = active_user(&ctx, bearer).await?;
    let users = ctx.user_repo();
    let notifications = ctx.notification_repo();
    let uc = FetchNotificationFeed {
        users: users.as_ref(),
        notifications: notifications.as_ref(),
    };
    let query = FeedQuery {
        page_chunk_size: params.page_chunk_size,
        starting_date: params.starting_date,
    };
    let items = uc.execute(&user, &query).await?;
    let out = items
        .into_iter()
        .zip(1..)
        .map(|(item, row)| GlobalNotificationFeedItem::from_item(item, row))
        .collect();
    Ok(Json(out))
}

#[utoipa::path(get, path = "/api/users/notifications/has-new", tag = "Notifications",
    responses((status = 200, body = HasNewResponse)))]
pub async fn has_new_notifications(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<HasNewResponse>, ApiError> {
    let user = active_user(&ctx, bearer).await?;
    let repo = ctx.notification_repo();
    let uc = HasNewNotifications {
        repo: repo.as_ref(),
    };
    let has_new = uc.execute(&user).await?;
    Ok(Json(HasNewResponse { has_new }))
}
