pub mod languages;
pub mod profile_url;
pub mod quality;
