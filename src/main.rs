use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use myapp_api::application::use_cases::auth::bootstrap_admin::{AdminSeed, BootstrapAdmin};
use myapp_api::bootstrap::app_context::{AppContext, AppServices};
use myapp_api::bootstrap::config::Config;
use myapp_api::infrastructure::db::repositories::{
    global_notification_repository_sqlx::SqlxGlobalNotificationRepository,
    password_reset_repository_sqlx::SqlxPasswordResetRepository,
    profile_repository_sqlx::SqlxProfileRepository, user_repository_sqlx::SqlxUserRepository,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            myapp_api::presentation::http::auth::register,
            myapp_api::presentation::http::auth::login,
            myapp_api::presentation::http::users::get_me,
            myapp_api::presentation::http::users::update_me,
            myapp_api::presentation::http::users::request_password_reset,
            myapp_api::presentation::http::users::notification_feed,
            myapp_api::presentation::http::users::has_new_notifications,
            myapp_api::presentation::http::profiles::get_profile_by_username,
            myapp_api::presentation::http::profiles::update_own_profile,
            myapp_api::presentation::http::admin::list_users,
            myapp_api::presentation::http::admin::list_unverified_users,
            myapp_api::presentation::http::admin::verify_users,
            myapp_api::presentation::http::admin::list_password_reset_requests,
            myapp_api::presentation::http::admin::reset_user_password,
            myapp_api::presentation::http::admin::delete_password_reset_request,
            myapp_api::presentation::http::admin::create_global_notification,
            myapp_api::presentation::http::admin::delete_global_notification,
            myapp_api::presentation::http::admin::update_user_role,
            myapp_api::presentation::http::health::health,
        ),
        components(schemas(
            myapp_api::domain::users::user::Role,
            myapp_api::domain::notifications::notification::FeedEventType,
            myapp_api::presentation::http::error::ErrorBody,
            myapp_api::presentation::http::auth::NewUserRequest,
            myapp_api::presentation::http::auth::RegisterBody,
            myapp_api::presentation::http::auth::AccessToken,
            myapp_api::presentation::http::auth::LoginForm,
            myapp_api::presentation::http::users::UserPublic,
            myapp_api::presentation::http::users::UserUpdate,
            myapp_api::presentation::http::users::UserUpdateBody,
            myapp_api::presentation::http::users::PasswordResetRequestCreate,
            myapp_api::presentation::http::users::PasswordResetBody,
            myapp_api::presentation::http::users::PasswordResetRequestPublic,
            myapp_api::presentation::http::users::GlobalNotificationFeedItem,
            myapp_api::presentation::http::users::HasNewResponse,
            myapp_api::presentation::http::profiles::ProfilePublic,
            myapp_api::presentation::http::profiles::ProfileUpdateRequest,
            myapp_api::presentation::http::profiles::ProfileUpdateBody,
            myapp_api::presentation::http::admin::VerifyUsersBody,
            myapp_api::presentation::http::admin::ResetPasswordBody,
            myapp_api::presentation::http::admin::GlobalNotificationCreate,
            myapp_api::presentation::http::admin::CreateNotificationBody,
            myapp_api::presentation::http::admin::GlobalNotificationPublic,
            myapp_api::presentation::http::admin::RoleUpdate,
            myapp_api::presentation::http::admin::RoleUpdateBody,
            myapp_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Users", description = "Registration, login and the current account"),
            (name = "Profiles", description = "User profiles"),
            (name = "Admin", description = "User administration"),
            (name = "Notifications", description = "Global notification feed"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "myapp_api=debug,tower_http=info,axum=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting myapp backend");

    // Database
    let pool = myapp_api::infrastructure::db::connect_pool(&cfg.database_url).await?;
    myapp_api::infrastructure::db::migrate(&pool).await?;

    let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));
    let profile_repo = Arc::new(SqlxProfileRepository::new(pool.clone()));
    let password_reset_repo = Arc::new(SqlxPasswordResetRepository::new(pool.clone()));
    let notification_repo = Arc::new(SqlxGlobalNotificationRepository::new(pool.clone()));

    if let Some(admin) = cfg.admin.clone() {
        let uc = BootstrapAdmin {
            repo: user_repo.as_ref(),
        };
        let seed = AdminSeed {
            email: admin.email,
            username: admin.username,
            password: admin.password,
        };
        match uc.execute(&seed).await {
            Ok(Some(user)) => info!(user_id = %user.id, "admin_account_created"),
            Ok(None) => info!("admin_account_present"),
            Err(e) => warn!(error = %e, "admin_bootstrap_failed"),
        }
    }

    let services = AppServices::new(
        &cfg,
        user_repo,
        profile_repo,
        password_reset_repo,
        notification_repo,
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        Some(Err(_)) | None if cfg.is_production() => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
            .allow_methods(methods)
            .allow_headers(headers),
        // Development convenience
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
    };

    let app = Router::new()
        .nest("/api", myapp_api::presentation::http::health::routes(pool))
        .nest("/api", myapp_api::presentation::http::routes(ctx))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = ?e, "ctrl_c_listener_failed");
    }
}
