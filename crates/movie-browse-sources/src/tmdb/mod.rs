pub mod api;
pub mod client;

pub use api::MoviePage;
pub use client::TmdbClient;

use movie_browse_models::{MovieDetail, ProviderRef};

pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
pub const POSTER_SIZE: &str = "w342";
pub const BACKDROP_SIZE: &str = "w780";

/// Provider buckets in presentation order.
const PROVIDER_BUCKETS: [&str; 5] = ["flatrate", "buy", "rent", "ads", "free"];

/// YouTube key of the best trailer candidate: an official trailer first,
/// any YouTube video as fallback.
pub fn trailer_key(detail: &MovieDetail) -> Option<&str> {
    let videos = &detail.videos.results;
    videos
        .iter()
        .find(|v| v.site == "YouTube" && v.video_type == "Trailer")
        .or_else(|| videos.iter().find(|v| v.site == "YouTube"))
        .map(|v| v.key.as_str())
}

pub fn imdb_url(detail: &MovieDetail) -> Option<String> {
    detail
        .external_ids
        .imdb_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(|id| format!("https://www.imdb.com/title/{}/", id))
}

pub fn poster_url(path: Option<&str>, size: &str) -> Option<String> {
    image_url(path, size)
}

pub fn backdrop_url(path: Option<&str>, size: &str) -> Option<String> {
    image_url(path, size)
}

fn image_url(path: Option<&str>, size: &str) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}/{}{}", IMAGE_BASE, size, p))
}

pub fn provider_url(provider_id: u64) -> String {
    format!("https://www.themoviedb.org/provider/{}", provider_id)
}

/// Flatten the given region's provider buckets (flatrate, buy, rent, ads,
/// free, in that order) into one list. Empty when the region is absent.
pub fn providers_for_region(detail: &MovieDetail, region: &str) -> Vec<ProviderRef> {
    let Some(offers) = detail.watch_providers.results.get(region) else {
        return Vec::new();
    };

    PROVIDER_BUCKETS
        .iter()
        .flat_map(|bucket| match *bucket {
            "flatrate" => offers.flatrate.iter(),
            "buy" => offers.buy.iter(),
            "rent" => offers.rent.iter(),
            "ads" => offers.ads.iter(),
            _ => offers.free.iter(),
        })
        .cloned()
        .collect()
}
