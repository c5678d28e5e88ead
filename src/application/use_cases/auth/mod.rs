pub mod bootstrap_admin;
pub mod login;
pub mod me;
pub mod register;
