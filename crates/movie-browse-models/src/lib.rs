pub mod genre;
pub mod links;
pub mod movie;
pub mod page;

pub use genre::GenreRef;
pub use links::{dedup_links, LinkEntry};
pub use movie::{MovieDetail, ProviderRef, RawMovie, RegionOffers, VideoRef};
pub use page::{EnrichedMovie, PageResult};
