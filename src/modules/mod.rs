pub mod auth;
pub mod catalog;
pub mod email;
pub mod subscription;
