use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::admin::list_users::ListUsers;
use crate::application::use_cases::admin::reset_password::ResetUserPassword;
use crate::application::use_cases::admin::update_role::UpdateUserRole;
use crate::application::use_cases::admin::verify_users::VerifyUsers;
use crate::application::use_cases::notifications::create::{
    CreateGlobalNotification, GlobalNotificationInput,
};
use crate::application::use_cases::notifications::delete::DeleteGlobalNotification;
use crate::application::use_cases::password_resets::delete::DeletePasswordResetRequest;
use crate::application::use_cases::password_resets::list::ListPasswordResetRequests;
use crate::bootstrap::app_context::AppContext;
use crate::domain::notifications::notification::GlobalNotification;
use crate::domain::users::user::Role;
use crate::presentation::http::auth::{Bearer, admin_user};
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::extract::{ApiJson, ApiPath};
use crate::presentation::http::users::{PasswordResetRequestPublic, UserPublic};

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyUsersBody {
    pub user_emails: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetPasswordBody {
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GlobalNotificationCreate {
    pub receiver_role: Role,
    pub title: String,
    pub body: String,
    pub label: String,
    pub link: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNotificationBody {
    pub notification: GlobalNotificationCreate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GlobalNotificationPublic {
    pub id: Uuid,
    pub sender: Option<String>,
    pub receiver_role: Role,
    pub title: String,
    pub body: String,
    pub label: String,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GlobalNotification> for GlobalNotificationPublic {
    fn from(n: GlobalNotification) -> Self {
        GlobalNotificationPublic {
            id: n.id,
            sender: n.sender,
            receiver_role: n.receiver_role,
            title: n.title,
            body: n.body,
            label: n.label,
            link: n.link,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleUpdate {
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleUpdateBody {
    pub role_update: RoleUpdate,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/admin/users", get(list_users))
        .route(
            "/admin/users-unverified",
            get(list_unverified_users).post(verify_users),
        )
        .route(
            "/admin/reset-user-password",
            get(list_password_reset_requests).post(reset_user_password),
        )
        .route(
            "/admin/delete-password-reset-request/:id",
            delete(delete_password_reset_request),
        )
        .route(
            "/admin/create-global-notification",
            post(create_global_notification),
        )
        .route(
            "/admin/delete-global-notification/:id",
            delete(delete_global_notification),
        )
        .route("/admin/update-user-role", put(update_user_role))
        .with_state(ctx)
}

async fn list_accounts(
    ctx: &AppContext,
    verified: Option<bool>,
) -> Result<Vec<UserPublic>, ApiError> {
    let users = ctx.user_repo();
    let profiles = ctx.profile_repo();
    let uc = ListUsers {
        users: users.as_ref(),
        profiles: profiles.as_ref(),
    };
    let accounts = uc.execute(verified).await?;
    Ok(accounts.into_iter().map(Into::into).collect())
}

#[utoipa::path(get, path = "/api/admin/users", tag = "Admin", responses(
    (status = 200, body = [UserPublic]),
    (status = 403, body = ErrorBody)
))]
pub async fn list_users(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<UserPublic>>, ApiError> {
    admin_user(&ctx, bearer).await?;
    Ok(Json(list_accounts(&ctx, None).await?))
}

#[utoipa::path(get, path = "/api/admin/users-unverified", tag = "Admin", responses(
    (status = 200, body = [UserPublic])
))]
pub async fn list_unverified_users(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<UserPublic>>, ApiError> {
    admin_user(&ctx, bearer).await?;
    Ok(Json(list_accounts(&ctx, Some(false)).await?))
}

#[utoipa::path(post, path = "/api/admin/users-unverified", tag = "Admin",
    request_body = VerifyUsersBody,
    responses(
        (status = 204, description = "All users verified"),
        (status = 400, body = ErrorBody)
    ))]
pub async fn verify_users(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiJson(body): ApiJson<VerifyUsersBody>,
) -> Result<StatusCode, ApiError> {
    admin_user(&ctx, bearer).await?;
    let repo = ctx.user_repo();
    let uc = VerifyUsers {
        repo: repo.as_ref(),
    };
    uc.execute(&body.user_emails).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/admin/reset-user-password", tag = "Admin", responses(
    (status = 200, body = [PasswordResetRequestPublic])
))]
pub async fn list_password_reset_requests(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<PasswordResetRequestPublic>>, ApiError> {
    admin_user(&ctx, bearer).await?;
    let repo = ctx.password_reset_repo();
    let uc = ListPasswordResetRequests {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/admin/reset-user-password", tag = "Admin",
    request_body = ResetPasswordBody,
    responses(
        (status = 200, description = "The new plain-text password", body = String),
        (status = 404, body = ErrorBody)
    ))]
pub async fn reset_user_password(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiJson(body): ApiJson<ResetPasswordBody>,
) -> Result<Json<String>, ApiError> {
    admin_user(&ctx, bearer).await?;
    let repo = ctx.user_repo();
    let uc = ResetUserPassword {
        repo: repo.as_ref(),
    };
    let password = uc.execute(&body.email).await?;
    Ok(Json(password))
}

#[utoipa::path(delete, path = "/api/admin/delete-password-reset-request/{id}", tag = "Admin",
    params(("id" = Uuid, Path, description = "Password reset request ID")),
    responses(
        (status = 200, description = "Request deleted"),
        (status = 404, body = ErrorBody)
    ))]
pub async fn delete_password_reset_request(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    admin_user(&ctx, bearer).await?;
    let repo = ctx.password_reset_repo();
    let uc = DeletePasswordResetRequest {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(post, path = "/api/admin/create-global-notification", tag = "Admin",
    request_body = CreateNotificationBody,
    responses(
        (status = 201, body = GlobalNotificationPublic),
        (status = 422, body = ErrorBody)
    ))]
pub async fn create_global_notification(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiJson(body): ApiJson<CreateNotificationBody>,
) -> Result<(StatusCode, Json<GlobalNotificationPublic>), ApiError> {
    let admin = admin_user(&ctx, bearer).await?;
    let repo = ctx.notification_repo();
    let uc = CreateGlobalNotification {
        repo: repo.as_ref(),
    };
    let n = body.notification;
    let input = GlobalNotificationInput {
        receiver_role: n.receiver_role,
        title: n.title,
        body: n.body,
        label: n.label,
        link: n.link,
    };
    let created = uc.execute(&admin, &input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(delete, path = "/api/admin/delete-global-notification/{id}", tag = "Admin",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 204, description = "Notification deleted"),
        (status = 404, body = ErrorBody)
    ))]
pub async fn delete_global_notification(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    admin_user(&ctx, bearer).await?;
    let repo = ctx.notification_repo();
    let uc = DeleteGlobalNotification {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(put, path = "/api/admin/update-user-role", tag = "Admin",
    request_body = RoleUpdateBody,
    responses(
        (status = 200, description = "Role updated"),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn update_user_role(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    ApiJson(body): ApiJson<RoleUpdateBody>,
) -> Result<StatusCode, ApiError> {
    admin_user(&ctx, bearer).await?;
    let repo = ctx.user_repo();
    let uc = UpdateUserRole {
        repo: repo.as_ref(),
        protect_superusers: ctx.cfg.is_production(),
    };
    uc.execute(&body.role_update.email, body.role_update.role)
        .await?;
    Ok(StatusCode::OK)
}
