use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod admin;
pub mod auth;
pub mod error;
pub mod extract;
pub mod health;
pub mod profiles;
pub mod users;

/// Every account, profile and admin route. Mounted under `/api`.
pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .merge(auth::routes(ctx.clone()))
        .merge(users::routes(ctx.clone()))
        .merge(profiles::routes(ctx.clone()))
        .merge(admin::routes(ctx))
}
