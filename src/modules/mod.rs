pub mod aggregation;
pub mod cache;
pub mod github;
pub mod linkedin;
pub mod portfolio;
pub mod translation;
pub mod visibility;
