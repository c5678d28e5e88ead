pub mod get_by_username;
pub mod update_own;
