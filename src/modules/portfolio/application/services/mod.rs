pub mod auth_token;
pub mod field_precedence;
pub mod image_url;
