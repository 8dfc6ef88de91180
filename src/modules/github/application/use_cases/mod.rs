pub mod extract_skills;
pub mod fetch_repositories;
