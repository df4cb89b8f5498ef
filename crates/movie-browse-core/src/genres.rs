use movie_browse_models::GenreRef;
use movie_browse_sources::{SourceError, TmdbClient};
use std::collections::HashMap;

/// Session-owned name→id mapping for genre filters, loaded once per
/// language. A language change replaces the whole mapping atomically; a
/// failed reload leaves the previous one in place.
#[derive(Default)]
pub struct GenreCatalog {
    lang: Option<String>,
    genres: Vec<GenreRef>,
    by_name: HashMap<String, u32>,
}

impl GenreCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and cache the genre list for `lang`, sorted by name
    /// (case-insensitive). Reuses the cache when the language matches.
    pub async fn load(
        &mut self,
        tmdb: &TmdbClient,
        lang: &str,
    ) -> Result<Vec<GenreRef>, SourceError> {
        if self.lang.as_deref() != Some(lang) {
            let genres = tmdb.list_genres(lang).await?;
            self.install(lang, genres);
        }
        Ok(self.genres.clone())
    }

    fn install(&mut self, lang: &str, mut genres: Vec<GenreRef>) {
        genres.sort_by_key(|g| g.name.to_lowercase());
        self.by_name = genres.iter().map(|g| (g.name.clone(), g.id)).collect();
        self.genres = genres;
        self.lang = Some(lang.to_string());
    }

    /// Resolve display names to ids. Names with no known id are dropped,
    /// never an error.
    pub fn resolve_ids(&self, names: &[String]) -> Vec<u32> {
        names
            .iter()
            .filter_map(|name| self.by_name.get(name).copied())
            .collect()
    }

    pub fn genres(&self) -> &[GenreRef] {
        &self.genres
    }

    pub fn loaded_language(&self) -> Option<&str> {
        self.lang.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre(id: u32, name: &str) -> GenreRef {
        GenreRef {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_install_sorts_case_insensitively() {
        let mut catalog = GenreCatalog::new();
        catalog.install(
            "en",
            vec![genre(53, "Thriller"), genre(28, "action"), genre(35, "Comedy")],
        );

        let names: Vec<&str> = catalog.genres().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["action", "Comedy", "Thriller"]);
    }

    #[test]
    fn test_unknown_names_are_dropped_silently() {
        let mut catalog = GenreCatalog::new();
        catalog.install("en", vec![genre(28, "Action"), genre(35, "Comedy")]);

        let ids = catalog.resolve_ids(&[
            "Action".to_string(),
            "Sock Puppetry".to_string(),
            "Comedy".to_string(),
        ]);
        assert_eq!(ids, vec![28, 35]);
    }

    #[test]
    fn test_language_reload_replaces_mapping() {
        let mut catalog = GenreCatalog::new();
        catalog.install("en", vec![genre(28, "Action")]);
        assert_eq!(catalog.resolve_ids(&["Action".to_string()]), vec![28]);

        catalog.install("fr", vec![genre(28, "Action"), genre(35, "Comédie")]);
        assert_eq!(catalog.loaded_language(), Some("fr"));
        assert_eq!(catalog.resolve_ids(&["Comédie".to_string()]), vec![35]);
    }
}
