//! Value Object Module

pub mod auth_provider;
pub mod email;
pub mod session_token;
pub mod user_id;
pub mod user_name;
pub mod user_password;
pub mod user_role;
