pub mod create;
pub mod delete;
pub mod feed;
pub mod has_new;
