pub mod global_notification_repository_sqlx;
pub mod password_reset_repository_sqlx;
pub mod profile_repository_sqlx;
pub mod user_repository_sqlx;
