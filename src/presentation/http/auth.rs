use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{StatusCode, header, request::Parts},
    routing::post,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::access;
use crate::application::services::tokens::{TOKEN_TYPE, get_username_from_token};
use crate::application::use_cases::auth::login::{Login, LoginRequest};
use crate::application::use_cases::auth::register::{Register, RegisterRequest};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::{Role, User};
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::extract::{ApiForm, ApiJson};
use crate::presentation::http::users::UserPublic;

pub const INVALID_TOKEN: &str = "Could not validate token credentials.";
pub const NOT_AUTHENTICATED: &str = "Not an authenticated user.";
pub const NOT_ACTIVE: &str = "Not an active user.";
pub const NOT_VERIFIED: &str =
    "Current user is not verified. An administrator will approve your account soon.";
pub const INSUFFICIENT_ROLE: &str = "You don't have the necessary access level for this resource.";
pub const LOGIN_FAILED: &str = "Authentication was unsuccessful.";

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewUserRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterBody {
    pub new_user: NewUserRequest,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
        }
    }
}

/// OAuth2 password form. `username` carries the email address.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users", post(register))
        .route("/users/login/token", post(login))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/users", tag = "Users", request_body = RegisterBody, security(()), responses(
    (status = 201, body = UserPublic),
    (status = 409, body = ErrorBody),
    (status = 422, body = ErrorBody)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    ApiJson(body): ApiJson<RegisterBody>,
) -> Result<(StatusCode, Json<UserPublic>), ApiError> {
    let users = ctx.user_repo();
    let profiles = ctx.profile_repo();
    let uc = Register {
        users: users.as_ref(),
        profiles: profiles.as_ref(),
        tokens: ctx.tokens(),
    };
    let req = RegisterRequest {
        email: body.new_user.email,
        username: body.new_user.username,
        password: body.new_user.password,
    };
    let out = uc.execute(&req).await?;
    let mut public = UserPublic::from(out.account);
    public.access_token = Some(AccessToken::bearer(out.access_token));
    Ok((StatusCode::CREATED, Json(public)))
}

#[utoipa::path(post, path = "/api/users/login/token", tag = "Users",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    security(()),
    responses(
        (status = 200, body = AccessToken),
        (status = 401, body = ErrorBody)
    ))]
pub async fn login(
    State(ctx): State<AppContext>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Json<AccessToken>, ApiError> {
    let repo = ctx.user_repo();
    let uc = Login {
        repo: repo.as_ref(),
        tokens: ctx.tokens(),
    };
    let req = LoginRequest {
        email: form.username,
        password: form.password,
    };
    let token = uc
        .execute(&req)
        .await?
        .ok_or_else(|| ApiError::unauthorized(LOGIN_FAILED))?;
    Ok(Json(AccessToken::bearer(token)))
}

// --- Bearer extractor & user guards ---

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|auth| {
                auth.strip_prefix("Bearer ")
                    .or_else(|| auth.strip_prefix("bearer "))
            })
            .map(str::trim)
            .filter(|t| !t.is_empty());
        match token {
            Some(t) => Ok(Bearer(t.to_string())),
            None => Err(ApiError::unauthorized("Not authenticated")),
        }
    }
}

/// Resolves the token to an existing, active user.
pub async fn active_user(ctx: &AppContext, bearer: Bearer) -> Result<User, ApiError> {
    let username = get_username_from_token(&bearer.0, ctx.tokens()).map_err(|e| {
        tracing::debug!(error = %e, "token_rejected");
        ApiError::unauthorized(INVALID_TOKEN)
    })?;
    let user = ctx
        .user_repo()
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::unauthorized(NOT_AUTHENTICATED))?;
    if !user.is_active {
        return Err(ApiError::unauthorized(NOT_ACTIVE));
    }
    Ok(user)
}

pub async fn verified_user(ctx: &AppContext, bearer: Bearer) -> Result<User, ApiError> {
    let user = active_user(ctx, bearer).await?;
    if !user.is_verified {
        return Err(ApiError::forbidden(NOT_VERIFIED));
    }
    Ok(user)
}

pub fn require_role(user: &User, required: Role) -> Result<(), ApiError> {
    if access::is_authorized(required, user.role) {
        Ok(())
    } else {
        Err(ApiError::forbidden(INSUFFICIENT_ROLE))
    }
}

pub async fn admin_user(ctx: &AppContext, bearer: Bearer) -> Result<User, ApiError> {
    let user = active_user(ctx, bearer).await?;
    require_role(&user, Role::Admin)?;
    Ok(user)
}
