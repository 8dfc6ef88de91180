pub mod build_projects;
pub mod derive_bio;
pub mod load_portfolio_view;
