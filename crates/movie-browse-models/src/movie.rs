use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One result item from a search or discover call. Not retained beyond the
/// request cycle that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawMovie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
}

impl RawMovie {
    /// Four-digit release year, if the date is present.
    pub fn release_year(&self) -> Option<&str> {
        self.release_date.get(..4).filter(|y| !y.is_empty())
    }
}

/// Full movie record with the videos, external-ids, and watch-provider
/// sub-resources appended. Fetched once per enriched movie.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MovieDetail {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub videos: VideoList,
    #[serde(default)]
    pub external_ids: ExternalIds,
    #[serde(default, rename = "watch/providers")]
    pub watch_providers: WatchProviders,
}

impl MovieDetail {
    pub fn release_year(&self) -> Option<&str> {
        self.release_date.get(..4).filter(|y| !y.is_empty())
    }

    /// Homepage URL, with empty strings treated as absent.
    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|h| !h.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<VideoRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRef {
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WatchProviders {
    #[serde(default)]
    pub results: HashMap<String, RegionOffers>,
}

/// Per-region provider buckets as returned by the metadata API.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegionOffers {
    #[serde(default)]
    pub flatrate: Vec<ProviderRef>,
    #[serde(default)]
    pub buy: Vec<ProviderRef>,
    #[serde(default)]
    pub rent: Vec<ProviderRef>,
    #[serde(default)]
    pub ads: Vec<ProviderRef>,
    #[serde(default)]
    pub free: Vec<ProviderRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderRef {
    pub provider_id: u64,
    pub provider_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_year() {
        let movie = RawMovie {
            release_date: "2014-11-05".to_string(),
            ..Default::default()
        };
        assert_eq!(movie.release_year(), Some("2014"));

        let undated = RawMovie::default();
        assert_eq!(undated.release_year(), None);
    }

    #[test]
    fn test_detail_deserializes_appended_subresources() {
        let json = serde_json::json!({
            "id": 157336,
            "title": "Interstellar",
            "overview": "Beyond the stars.",
            "release_date": "2014-11-05",
            "vote_average": 8.4,
            "poster_path": "/poster.jpg",
            "homepage": "https://interstellar.example",
            "videos": { "results": [
                { "site": "YouTube", "type": "Trailer", "key": "zSWdZVtXT7E" }
            ]},
            "external_ids": { "imdb_id": "tt0816692" },
            "watch/providers": { "results": {
                "US": { "flatrate": [
                    { "provider_id": 8, "provider_name": "Netflix" }
                ]}
            }}
        });

        let detail: MovieDetail = serde_json::from_value(json).unwrap();
        assert_eq!(detail.videos.results.len(), 1);
        assert_eq!(detail.external_ids.imdb_id.as_deref(), Some("tt0816692"));
        assert_eq!(
            detail.watch_providers.results["US"].flatrate[0].provider_name,
            "Netflix"
        );
    }

    #[test]
    fn test_detail_tolerates_missing_subresources() {
        let detail: MovieDetail =
            serde_json::from_value(serde_json::json!({ "id": 1, "title": "Bare" })).unwrap();
        assert!(detail.videos.results.is_empty());
        assert!(detail.external_ids.imdb_id.is_none());
        assert!(detail.watch_providers.results.is_empty());
        assert_eq!(detail.homepage(), None);
    }
}
