pub mod repository_query;

pub use repository_query::{RepositoryQuery, RepositoryQueryError};
