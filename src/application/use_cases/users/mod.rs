pub mod accounts;
pub mod update_user;
