use crate::error::SourceError;
use crate::retry::RetryPolicy;
use movie_browse_models::{dedup_links, LinkEntry};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const SERP_BASE: &str = "https://serpapi.com/search.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const MAX_ORGANIC_RESULTS: usize = 10;
const MAX_VIDEO_RESULTS: usize = 5;
const MAX_CANDIDATES: usize = 15;

#[derive(Debug, Deserialize, Default)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<SearchResult>,
    #[serde(default)]
    video_results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    title: Option<String>,
    link: Option<String>,
}

/// "Where to watch" candidate links from a generic search-engine API.
/// Without a key the client is disabled: every lookup returns an empty list
/// without touching the network. That capability is decided once here, not
/// re-checked per call.
pub struct WatchLinkClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    retry: RetryPolicy,
}

impl WatchLinkClient {
    pub fn new(api_key: Option<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(SourceError::Init)?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: SERP_BASE.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    /// A client with no key, useful when the feature is switched off in
    /// config regardless of credential presence.
    pub fn disabled() -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: None,
            base_url: SERP_BASE.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Candidate watch links for a title, deduplicated by URL with
    /// first-seen labels. Video results carry a " (Video)" suffix.
    pub async fn find_watch_links(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<Vec<LinkEntry>, SourceError> {
        let Some(api_key) = &self.api_key else {
            return Ok(Vec::new());
        };

        let mut query = format!("watch \"{}\" online", title);
        if let Some(year) = year {
            query.push_str(&format!(" ({})", year));
        }

        let params = [
            ("q", query),
            ("api_key", api_key.clone()),
            ("engine", "google".to_string()),
            ("num", "10".to_string()),
            ("safe", "active".to_string()),
        ];
        let params = &params;

        let data: SearchResponse = self
            .retry
            .run(|| async move {
                let response = self
                    .client
                    .get(&self.base_url)
                    .query(params)
                    .send()
                    .await
                    .map_err(|e| SourceError::Network {
                        endpoint: "search".to_string(),
                        source: e,
                    })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Upstream {
                        endpoint: "search".to_string(),
                        status: status.as_u16(),
                    });
                }

                response.json().await.map_err(|e| SourceError::Network {
                    endpoint: "search".to_string(),
                    source: e,
                })
            })
            .await?;

        let mut candidates = Vec::new();
        for item in data.organic_results.into_iter().take(MAX_ORGANIC_RESULTS) {
            if let (Some(title), Some(link)) = (item.title, item.link) {
                candidates.push(LinkEntry::new(title, link));
            }
        }
        for item in data.video_results.into_iter().take(MAX_VIDEO_RESULTS) {
            if let (Some(title), Some(link)) = (item.title, item.link) {
                candidates.push(LinkEntry::new(format!("{} (Video)", title), link));
            }
        }
        candidates.truncate(MAX_CANDIDATES);

        debug!(count = candidates.len(), title = %title, "watch-link candidates");
        Ok(dedup_links(candidates))
    }
}
