pub mod update_portfolio;
pub mod upload_profile_image;
