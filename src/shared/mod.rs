pub mod status;
pub mod text;
