use movie_browse_models::{GenreRef, RawMovie};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<GenreRef>,
}

/// One raw results page from the search or discover endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<RawMovie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}
