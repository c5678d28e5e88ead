pub mod admin;
pub mod auth;
pub mod notifications;
pub mod password_resets;
pub mod profiles;
pub mod users;
