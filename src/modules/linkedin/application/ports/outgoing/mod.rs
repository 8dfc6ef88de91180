pub mod profile_scrape;

pub use profile_scrape::{ProfileScrape, ProfileScrapeError};
