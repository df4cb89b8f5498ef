use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A labeled external link on an enriched movie card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkEntry {
    pub label: String,
    pub url: String,
}

impl LinkEntry {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Deduplicate links by URL, keeping the first occurrence and its label.
/// Order of the surviving entries matches the input order.
pub fn dedup_links(links: Vec<LinkEntry>) -> Vec<LinkEntry> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let links = vec![
            LinkEntry::new("IMDB", "https://a.example/x"),
            LinkEntry::new("Mirror", "https://a.example/x"),
            LinkEntry::new("Official Site", "https://b.example/y"),
        ];

        let deduped = dedup_links(links);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].label, "IMDB");
        assert_eq!(deduped[1].label, "Official Site");
    }

    #[test]
    fn test_dedup_preserves_order() {
        let links = vec![
            LinkEntry::new("c", "https://c.example"),
            LinkEntry::new("a", "https://a.example"),
            LinkEntry::new("b", "https://b.example"),
            LinkEntry::new("a again", "https://a.example"),
        ];

        let urls: Vec<String> = dedup_links(links).into_iter().map(|l| l.url).collect();
        assert_eq!(
            urls,
            vec!["https://c.example", "https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_dedup_empty() {
        assert!(dedup_links(Vec::new()).is_empty());
    }
}
