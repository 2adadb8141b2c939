use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// One aggregated news item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub source_name: String,
    pub source_url: String,
    /// ISO-8601 UTC timestamp, kept verbatim so a bad value can be reported.
    pub published_at: String,
    pub topic: String,
    #[serde(default)]
    pub canonical_url: String,
    #[serde(default)]
    pub original_url: String,
    #[serde(default)]
    pub is_valid_source_url: bool,
    #[serde(default)]
    pub source_url_status_code: Option<u16>,
    #[serde(default, alias = "summary_ko")]
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub content_text: Option<String>,
    #[serde(default)]
    pub cluster_id: Option<String>,
    #[serde(default)]
    pub content_hash: Option<String>,
}

impl Article {
    /// Parses `published_at`, classifying a failure against this article.
    pub fn published_at_utc(&self) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.published_at.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|source| Error::InvalidTimestamp {
                article_id: self.id.clone(),
                value: self.published_at.clone(),
                source,
            })
    }

    /// Ordering key for `published_at`. Unparseable values sort before every
    /// parseable one and then by their raw text, so the key is a total order.
    pub fn published_key(&self) -> (Option<DateTime<Utc>>, &str) {
        (self.published_at_utc().ok(), self.published_at.as_str())
    }

    pub fn content_len(&self) -> usize {
        self.content_text
            .as_deref()
            .map(|text| text.chars().count())
            .unwrap_or(0)
    }

    /// Text used for term vectors and keyword search.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }
}

/// Topic buckets known to trend aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    #[serde(rename = "AI")]
    Ai,
    ScienceTech,
    Other,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Ai, Topic::ScienceTech, Topic::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Ai => "AI",
            Topic::ScienceTech => "ScienceTech",
            Topic::Other => "Other",
        }
    }

    /// Maps a stored label to a bucket. Labels outside the fixed set map to
    /// nothing rather than silently landing in `Other`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.as_str() == label)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A group of two or more related articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub cluster_id: String,
    pub cluster_title: String,
    #[serde(alias = "cluster_summary_ko")]
    pub cluster_summary: String,
    pub keywords: Vec<String>,
    pub article_ids: Vec<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCount {
    pub source: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRatio {
    #[serde(rename = "AI")]
    pub ai: usize,
    #[serde(rename = "ScienceTech")]
    pub science_tech: usize,
    #[serde(rename = "Other")]
    pub other: usize,
}

impl TopicRatio {
    pub fn record(&mut self, topic: Topic) {
        match topic {
            Topic::Ai => self.ai += 1,
            Topic::ScienceTech => self.science_tech += 1,
            Topic::Other => self.other += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.ai + self.science_tech + self.other
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSnapshot {
    pub recent_days: u32,
    pub keywords_top: Vec<KeywordCount>,
    pub source_distribution: Vec<SourceCount>,
    pub topic_ratio: TopicRatio,
}

/// A collected record before summarization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    pub id: String,
    pub title: String,
    pub source_name: String,
    pub source_url: String,
    pub published_at: String,
    pub topic: String,
    pub url: String,
    pub content: String,
    #[serde(default)]
    pub status_code: Option<u16>,
}

/// Output shape of a summarizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub summary: String,
    pub key_points: Vec<String>,
    pub keywords: Vec<String>,
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub mode: String,
    pub items: Vec<Article>,
    pub clusters: Vec<Cluster>,
    pub trends: TrendSnapshot,
    pub generated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(published_at: &str) -> Article {
        Article {
            id: "a1".to_string(),
            title: "Title".to_string(),
            source_name: "src".to_string(),
            source_url: "https://example.com/a".to_string(),
            published_at: published_at.to_string(),
            topic: "AI".to_string(),
            canonical_url: String::new(),
            original_url: String::new(),
            is_valid_source_url: true,
            source_url_status_code: None,
            summary: "summary".to_string(),
            key_points: vec![],
            keywords: vec![],
            content_text: None,
            cluster_id: None,
            content_hash: None,
        }
    }

    #[test]
    fn test_published_at_parses_zulu() {
        let parsed = article("2026-02-24T10:00:00Z").published_at_utc().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-02-24T10:00:00+00:00");
    }

    #[test]
    fn test_published_at_error_is_classified() {
        match article("not a date").published_at_utc() {
            Err(Error::InvalidTimestamp { article_id, value, .. }) => {
                assert_eq!(article_id, "a1");
                assert_eq!(value, "not a date");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_dates_sort_first() {
        let bad = article("garbage");
        let good = article("2020-01-01T00:00:00Z");
        assert!(bad.published_key() < good.published_key());
    }

    #[test]
    fn test_legacy_summary_field_is_accepted() {
        let json = r#"{
            "id": "a1", "title": "t", "source_name": "s", "source_url": "u",
            "published_at": "2026-02-24T10:00:00Z", "topic": "AI",
            "summary_ko": "legacy"
        }"#;
        let parsed: Article = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.summary, "legacy");
        assert!(parsed.cluster_id.is_none());
    }

    #[test]
    fn test_topic_labels() {
        assert_eq!(Topic::from_label("AI"), Some(Topic::Ai));
        assert_eq!(Topic::from_label("ScienceTech"), Some(Topic::ScienceTech));
        assert_eq!(Topic::from_label("Sports"), None);
        assert_eq!(serde_json::to_string(&Topic::Ai).unwrap(), "\"AI\"");
    }
}
