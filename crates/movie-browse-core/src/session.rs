use crate::enrich::Enricher;
use crate::genres::GenreCatalog;
use movie_browse_config::{Config, CredentialStore};
use movie_browse_models::{GenreRef, PageResult, RawMovie};
use movie_browse_sources::{SourceError, TmdbClient, WatchLinkClient};
use std::sync::Arc;
use tracing::{info, warn};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query.";

/// The two independent query modes, each with its own pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Search,
    Discover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    Idle,
    Loading,
    Ready,
    Errored,
}

#[derive(Debug, Clone)]
enum FlowRequest {
    Search {
        query: String,
        lang: String,
        page_size: usize,
    },
    Discover {
        genre_names: Vec<String>,
        lang: String,
        original_language: Option<String>,
        page_size: usize,
    },
}

/// Per-flow pagination state, superseded by every new request.
pub struct FlowState {
    request: Option<FlowRequest>,
    phase: FlowPhase,
    current_page: u32,
    total_pages: u32,
    last: Option<PageResult>,
}

impl FlowState {
    fn new() -> Self {
        Self {
            request: None,
            phase: FlowPhase::Idle,
            current_page: 1,
            total_pages: 0,
            last: None,
        }
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn last_result(&self) -> Option<&PageResult> {
        self.last.as_ref()
    }
}

/// One user session: owns the clients, the genre catalog, and one state
/// per flow. `&mut self` on every operation serializes requests, so a new
/// request supersedes the previous one instead of racing it.
pub struct BrowseSession {
    tmdb: Arc<TmdbClient>,
    enricher: Enricher,
    catalog: GenreCatalog,
    region: String,
    search_flow: FlowState,
    discover_flow: FlowState,
}

impl BrowseSession {
    pub fn new(tmdb: TmdbClient, watch_links: WatchLinkClient, region: impl Into<String>) -> Self {
        let tmdb = Arc::new(tmdb);
        Self {
            enricher: Enricher::new(Arc::clone(&tmdb), watch_links),
            tmdb,
            catalog: GenreCatalog::new(),
            region: region.into(),
            search_flow: FlowState::new(),
            discover_flow: FlowState::new(),
        }
    }

    /// Build a session from config and credentials. Fails fast when the
    /// metadata credential is missing; a missing search credential only
    /// disables the watch-link feature.
    pub fn from_config(
        config: &Config,
        credentials: &CredentialStore,
    ) -> Result<Self, SourceError> {
        let tmdb = TmdbClient::new(credentials.tmdb_api_key())?;
        let watch_links = if config.search.enabled {
            WatchLinkClient::new(credentials.serpapi_api_key())?
        } else {
            WatchLinkClient::disabled()
        };
        Ok(Self::new(tmdb, watch_links, config.metadata.region.clone()))
    }

    pub fn flow(&self, kind: FlowKind) -> &FlowState {
        match kind {
            FlowKind::Search => &self.search_flow,
            FlowKind::Discover => &self.discover_flow,
        }
    }

    fn flow_mut(&mut self, kind: FlowKind) -> &mut FlowState {
        match kind {
            FlowKind::Search => &mut self.search_flow,
            FlowKind::Discover => &mut self.discover_flow,
        }
    }

    pub async fn load_genres(&mut self, lang: &str) -> Result<Vec<GenreRef>, SourceError> {
        self.catalog.load(&self.tmdb, lang).await
    }

    /// Free-text search. A blank query short-circuits with a friendly
    /// message and no network traffic.
    pub async fn search(
        &mut self,
        query: &str,
        lang: &str,
        page: u32,
        page_size: usize,
    ) -> PageResult {
        let query = query.trim();
        if query.is_empty() {
            return PageResult::empty(EMPTY_QUERY_MESSAGE);
        }

        let request = FlowRequest::Search {
            query: query.to_string(),
            lang: lang.to_string(),
            page_size,
        };
        self.run(FlowKind::Search, request, page.max(1)).await
    }

    /// Browse by genre display names. Unknown names resolve to nothing and
    /// are dropped.
    pub async fn discover(
        &mut self,
        genre_names: &[String],
        lang: &str,
        original_language: Option<&str>,
        page: u32,
        page_size: usize,
    ) -> PageResult {
        let request = FlowRequest::Discover {
            genre_names: genre_names.to_vec(),
            lang: lang.to_string(),
            original_language: original_language.map(str::to_string),
            page_size,
        };
        self.run(FlowKind::Discover, request, page.max(1)).await
    }

    /// Re-run the flow's last request one page back, clamped at page 1.
    /// None when the flow has not run yet.
    pub async fn go_prev(&mut self, kind: FlowKind) -> Option<PageResult> {
        let state = self.flow(kind);
        let request = state.request.clone()?;
        let page = state.current_page.saturating_sub(1).max(1);
        Some(self.run(kind, request, page).await)
    }

    /// Re-run the flow's last request one page forward, clamped at the
    /// last known total_pages (unclamped while totals are still unknown).
    pub async fn go_next(&mut self, kind: FlowKind) -> Option<PageResult> {
        let state = self.flow(kind);
        let request = state.request.clone()?;
        let next = state.current_page + 1;
        let page = if state.total_pages > 0 {
            next.min(state.total_pages)
        } else {
            next
        };
        Some(self.run(kind, request, page).await)
    }

    async fn run(&mut self, kind: FlowKind, request: FlowRequest, page: u32) -> PageResult {
        self.flow_mut(kind).phase = FlowPhase::Loading;
        let outcome = self.execute(&request, page).await;
        let state = self.flow_mut(kind);
        match outcome {
            Ok(result) => {
                state.phase = FlowPhase::Ready;
                state.request = Some(request);
                state.current_page = result.page;
                state.total_pages = result.total_pages;
                state.last = Some(result.clone());
                result
            }
            Err(err) => {
                warn!(?kind, page, error = %err, "page fetch failed");
                state.phase = FlowPhase::Errored;
                state.request = Some(request);
                PageResult {
                    message: format!("Something went wrong: {}", err),
                    items: Vec::new(),
                    total_pages: state.total_pages,
                    total_results: 0,
                    page,
                }
            }
        }
    }

    async fn execute(
        &mut self,
        request: &FlowRequest,
        page: u32,
    ) -> Result<PageResult, SourceError> {
        match request {
            FlowRequest::Search {
                query,
                lang,
                page_size,
            } => {
                let data = self.tmdb.search_movies(query, lang, page).await?;
                // Truncate before enrichment; per-item detail fetches are
                // the expensive part.
                let batch: Vec<RawMovie> =
                    data.results.into_iter().take(*page_size).collect();
                info!(query = %query, page, count = batch.len(), "enriching search page");
                let items = self.enricher.enrich_page(&batch, lang, &self.region).await;
                Ok(PageResult {
                    message: format!("Found {} result(s).", data.total_results),
                    items,
                    total_pages: data.total_pages,
                    total_results: data.total_results,
                    page,
                })
            }
            FlowRequest::Discover {
                genre_names,
                lang,
                original_language,
                page_size,
            } => {
                self.catalog.load(&self.tmdb, lang).await?;
                let genre_ids = self.catalog.resolve_ids(genre_names);
                let data = self
                    .tmdb
                    .discover(
                        &genre_ids,
                        lang,
                        page,
                        Some(&self.region),
                        original_language.as_deref(),
                    )
                    .await?;
                let batch: Vec<RawMovie> =
                    data.results.into_iter().take(*page_size).collect();
                info!(?genre_ids, page, count = batch.len(), "enriching discover page");
                let items = self.enricher.enrich_page(&batch, lang, &self.region).await;
                Ok(PageResult {
                    message: format!("Showing top {} of {}+.", items.len(), data.total_results),
                    items,
                    total_pages: data.total_pages,
                    total_results: data.total_results,
                    page,
                })
            }
        }
    }
}
