pub mod list_users;
pub mod reset_password;
pub mod update_role;
pub mod verify_users;
