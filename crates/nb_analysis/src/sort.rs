use std::fmt;
use std::str::FromStr;

use nb_core::{Article, Error};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest first
    #[default]
    Latest,
    Oldest,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latest" => Ok(SortOrder::Latest),
            "oldest" => Ok(SortOrder::Oldest),
            other => Err(Error::InvalidOrder(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Latest => f.write_str("latest"),
            SortOrder::Oldest => f.write_str("oldest"),
        }
    }
}

/// Sorts by `(published_at, source, title, id)`, source and title compared
/// case-insensitively. The trailing id makes the order total.
pub fn stable_sort(mut articles: Vec<Article>, order: SortOrder) -> Vec<Article> {
    articles.sort_by_cached_key(|a| {
        let (published, raw) = a.published_key();
        // raw text only orders values that failed to parse
        let raw = if published.is_some() { String::new() } else { raw.to_string() };
        (
            published,
            raw,
            a.source_name.to_lowercase(),
            a.title.to_lowercase(),
            a.id.clone(),
        )
    });
    if order == SortOrder::Latest {
        articles.reverse();
    }
    articles
}
