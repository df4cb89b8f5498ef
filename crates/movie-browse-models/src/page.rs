use crate::links::LinkEntry;
use crate::movie::ProviderRef;
use serde::{Deserialize, Serialize};

/// A raw result decorated with trailer, external links, and watch providers.
/// Immutable once built; lives for one render cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedMovie {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub vote_average: f64,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub trailer_key: Option<String>,
    /// Unique by url; IMDB first, then Official Site, then web-search hits.
    pub links: Vec<LinkEntry>,
    pub providers: Vec<ProviderRef>,
}

/// One page of enriched results plus the pagination metadata the UI needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    pub message: String,
    pub items: Vec<EnrichedMovie>,
    pub total_pages: u32,
    pub total_results: u32,
    pub page: u32,
}

impl PageResult {
    /// An empty page carrying only a user-facing message.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            items: Vec::new(),
            total_pages: 0,
            total_results: 0,
            page: 1,
        }
    }
}
