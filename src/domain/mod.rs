pub mod notifications;
pub mod password_resets;
pub mod profiles;
pub mod users;
