use movie_browse_models::{dedup_links, EnrichedMovie, LinkEntry, MovieDetail, RawMovie};
use movie_browse_sources::tmdb::{
    self, backdrop_url, imdb_url, poster_url, trailer_key, BACKDROP_SIZE, POSTER_SIZE,
};
use movie_browse_sources::{TmdbClient, WatchLinkClient};
use std::sync::Arc;
use tracing::warn;

/// Decorates one raw search/discover result with its trailer, external
/// links, and watch providers. Enrichments of different movies share no
/// mutable state, so a page can run them concurrently.
pub struct Enricher {
    tmdb: Arc<TmdbClient>,
    watch_links: WatchLinkClient,
}

impl Enricher {
    pub fn new(tmdb: Arc<TmdbClient>, watch_links: WatchLinkClient) -> Self {
        Self { tmdb, watch_links }
    }

    /// Enrich one movie. A failed detail fetch degrades to a placeholder
    /// built from the raw fields rather than failing the whole page; a
    /// failed watch-link lookup degrades to an empty link list.
    pub async fn enrich(&self, raw: &RawMovie, lang: &str, region: &str) -> EnrichedMovie {
        let detail = match self.tmdb.details(raw.id, lang).await {
            Ok(detail) => detail,
            Err(err) => {
                warn!(movie_id = raw.id, error = %err, "detail fetch failed, using placeholder");
                return placeholder(raw);
            }
        };

        // Raw values reflect the user's query context, so they win over
        // the detail record.
        let title = if raw.title.is_empty() {
            detail.title.clone()
        } else {
            raw.title.clone()
        };
        let year = raw.release_year().or_else(|| detail.release_year());

        let searched = match self.watch_links.find_watch_links(&title, year).await {
            Ok(links) => links,
            Err(err) => {
                warn!(movie_id = raw.id, error = %err, "watch-link lookup failed, skipping");
                Vec::new()
            }
        };

        assemble(&detail, region, searched)
    }

    /// Enrich a whole page concurrently. Output order matches input order
    /// regardless of completion order.
    pub async fn enrich_page(
        &self,
        items: &[RawMovie],
        lang: &str,
        region: &str,
    ) -> Vec<EnrichedMovie> {
        let tasks = items.iter().map(|raw| self.enrich(raw, lang, region));
        futures::future::join_all(tasks).await
    }
}

/// Links in fixed priority order (IMDB, Official Site, then web-search
/// hits), deduplicated by URL.
fn assemble(detail: &MovieDetail, region: &str, searched: Vec<LinkEntry>) -> EnrichedMovie {
    let mut links = Vec::new();
    if let Some(url) = imdb_url(detail) {
        links.push(LinkEntry::new("IMDB", url));
    }
    if let Some(home) = detail.homepage() {
        links.push(LinkEntry::new("Official Site", home));
    }
    links.extend(searched);

    EnrichedMovie {
        id: detail.id,
        title: detail.title.clone(),
        overview: detail.overview.clone(),
        release_date: detail.release_date.clone(),
        vote_average: detail.vote_average,
        poster_url: poster_url(detail.poster_path.as_deref(), POSTER_SIZE),
        backdrop_url: backdrop_url(detail.backdrop_path.as_deref(), BACKDROP_SIZE),
        trailer_key: trailer_key(detail).map(str::to_string),
        links: dedup_links(links),
        providers: tmdb::providers_for_region(detail, region),
    }
}

/// Card built from the raw result alone, used when the detail fetch fails.
fn placeholder(raw: &RawMovie) -> EnrichedMovie {
    EnrichedMovie {
        id: raw.id,
        title: raw.title.clone(),
        overview: raw.overview.clone(),
        release_date: raw.release_date.clone(),
        vote_average: raw.vote_average,
        poster_url: poster_url(raw.poster_path.as_deref(), POSTER_SIZE),
        backdrop_url: backdrop_url(raw.backdrop_path.as_deref(), BACKDROP_SIZE),
        trailer_key: None,
        links: Vec::new(),
        providers: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: u64, title: &str) -> RawMovie {
        RawMovie {
            id,
            title: title.to_string(),
            overview: "An overview.".to_string(),
            release_date: "2014-11-05".to_string(),
            vote_average: 8.4,
            poster_path: Some("/p.jpg".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_placeholder_keeps_raw_fields_and_no_enrichment() {
        let card = placeholder(&raw(7, "Interstellar"));
        assert_eq!(card.id, 7);
        assert_eq!(card.title, "Interstellar");
        assert_eq!(
            card.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w342/p.jpg")
        );
        assert!(card.trailer_key.is_none());
        assert!(card.links.is_empty());
        assert!(card.providers.is_empty());
    }

    #[test]
    fn test_assemble_orders_links_imdb_first_and_dedups() {
        let mut detail = MovieDetail {
            id: 7,
            title: "Interstellar".to_string(),
            homepage: Some("https://interstellar.example".to_string()),
            ..Default::default()
        };
        detail.external_ids.imdb_id = Some("tt0816692".to_string());

        let searched = vec![
            // Duplicate of the homepage; its label must not win.
            LinkEntry::new("Watch here", "https://interstellar.example"),
            LinkEntry::new("Acme", "https://acme.example/i"),
        ];

        let card = assemble(&detail, "US", searched);
        let labels: Vec<&str> = card.links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["IMDB", "Official Site", "Acme"]);
    }

    #[test]
    fn test_assemble_without_imdb_or_homepage() {
        let detail = MovieDetail {
            id: 7,
            title: "Obscure".to_string(),
            ..Default::default()
        };
        let card = assemble(&detail, "US", Vec::new());
        assert!(card.links.is_empty());
    }
}
