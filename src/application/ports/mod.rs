pub mod global_notification_repository;
pub mod password_reset_repository;
pub mod profile_repository;
pub mod user_repository;
