use crate::error::SourceError;
use crate::retry::RetryPolicy;
use crate::tmdb::api::{GenreListResponse, MoviePage};
use movie_browse_models::{GenreRef, MovieDetail};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const TMDB_BASE: &str = "https://api.themoviedb.org/3";

/// All outbound calls share one fixed timeout, independent of retries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const DETAIL_APPENDS: &str = "videos,external_ids,watch/providers";

/// Typed client for the movie-metadata API. JWT-shaped keys go out as a
/// bearer header, classic keys as an `api_key` query parameter.
pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    bearer_auth: bool,
    base_url: String,
    retry: RetryPolicy,
}

impl TmdbClient {
    /// Fails with `MissingCredential` before any network call when no key
    /// is configured.
    pub fn new(api_key: Option<String>) -> Result<Self, SourceError> {
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .ok_or(SourceError::MissingCredential("TMDB_API_KEY"))?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(SourceError::Init)?;

        Ok(Self {
            bearer_auth: api_key.starts_with("eyJ"),
            api_key,
            client,
            base_url: TMDB_BASE.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn list_genres(&self, lang: &str) -> Result<Vec<GenreRef>, SourceError> {
        let params = [("language", lang.to_string())];
        let data: GenreListResponse = self.get_json("/genre/movie/list", &params).await?;
        Ok(data.genres)
    }

    /// Free-text movie search. Adult content is excluded unconditionally.
    pub async fn search_movies(
        &self,
        query: &str,
        lang: &str,
        page: u32,
    ) -> Result<MoviePage, SourceError> {
        let params = [
            ("query", query.to_string()),
            ("language", lang.to_string()),
            ("page", page.to_string()),
            ("include_adult", "false".to_string()),
        ];
        self.get_json("/search/movie", &params).await
    }

    /// Discover movies by genre filter, most popular first. Omitted filters
    /// omit their query parameter entirely.
    pub async fn discover(
        &self,
        genre_ids: &[u32],
        lang: &str,
        page: u32,
        region: Option<&str>,
        original_language: Option<&str>,
    ) -> Result<MoviePage, SourceError> {
        let mut params = Vec::new();
        if !genre_ids.is_empty() {
            let joined = genre_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("with_genres", joined));
        }
        params.push(("language", lang.to_string()));
        params.push(("page", page.to_string()));
        params.push(("sort_by", "popularity.desc".to_string()));
        params.push(("include_adult", "false".to_string()));
        if let Some(region) = region {
            params.push(("region", region.to_string()));
            params.push(("watch_region", region.to_string()));
        }
        if let Some(original) = original_language {
            params.push(("with_original_language", original.to_string()));
        }

        self.get_json("/discover/movie", &params).await
    }

    /// Full details with videos, external IDs, and watch providers appended
    /// in one composite fetch.
    pub async fn details(&self, movie_id: u64, lang: &str) -> Result<MovieDetail, SourceError> {
        let endpoint = format!("/movie/{}", movie_id);
        let params = [
            ("language", lang.to_string()),
            ("append_to_response", DETAIL_APPENDS.to_string()),
        ];
        self.get_json(&endpoint, &params).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, SourceError> {
        self.retry
            .run(|| async move {
                let url = format!("{}{}", self.base_url, endpoint);
                debug!(url = %url, "metadata request");

                let mut request = self.client.get(&url).query(params);
                if self.bearer_auth {
                    request = request.bearer_auth(&self.api_key);
                } else {
                    request = request.query(&[("api_key", self.api_key.as_str())]);
                }

                let response = request.send().await.map_err(|e| SourceError::Network {
                    endpoint: endpoint.to_string(),
                    source: e,
                })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Upstream {
                        endpoint: endpoint.to_string(),
                        status: status.as_u16(),
                    });
                }

                response.json::<T>().await.map_err(|e| SourceError::Network {
                    endpoint: endpoint.to_string(),
                    source: e,
                })
            })
            .await
    }
}
