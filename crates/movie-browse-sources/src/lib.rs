pub mod error;
pub mod retry;
pub mod tmdb;
pub mod websearch;

pub use error::SourceError;
pub use retry::RetryPolicy;
pub use tmdb::TmdbClient;
pub use websearch::WatchLinkClient;
