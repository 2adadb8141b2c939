use std::fmt;

use async_trait::async_trait;
use lazy_static::lazy_static;
use nb_analysis::rank::top_by_frequency;
use nb_analysis::terms;
use nb_core::{Result, Summarizer, Summary};
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]").unwrap();
}

const SUMMARY_SENTENCES: usize = 2;
const SUMMARY_CHARS: usize = 240;
const KEY_POINTS: usize = 4;
const KEY_POINT_CHARS: usize = 90;
const KEYWORDS: usize = 6;

pub const EMPTY_SUMMARY: &str = "Summary unavailable";
pub const EMPTY_KEY_POINT: &str = "No key sentences found";

/// Extractive summarizer: leading sentences and most frequent terms.
#[derive(Default)]
pub struct RuleBasedSummarizer;

impl fmt::Debug for RuleBasedSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleBasedSummarizer").finish()
    }
}

impl RuleBasedSummarizer {
    pub fn new() -> Self {
        Self
    }

    fn summarize_sync(&self, text: &str) -> Summary {
        let cleaned = WHITESPACE.replace_all(text, " ");
        let cleaned = cleaned.trim();
        let sentences: Vec<&str> = SENTENCE_END
            .split(cleaned)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let lead = sentences
            .iter()
            .take(SUMMARY_SENTENCES)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        let summary = if lead.is_empty() {
            EMPTY_SUMMARY.to_string()
        } else {
            truncate_chars(&lead, SUMMARY_CHARS)
        };

        let mut key_points: Vec<String> = sentences
            .iter()
            .take(KEY_POINTS)
            .map(|s| truncate_chars(s, KEY_POINT_CHARS))
            .collect();
        if key_points.is_empty() {
            key_points.push(EMPTY_KEY_POINT.to_string());
        }

        let keywords = top_by_frequency(terms(cleaned), KEYWORDS)
            .into_iter()
            .map(|(term, _)| term)
            .collect();

        Summary {
            summary,
            key_points,
            keywords,
        }
    }
}

#[async_trait]
impl Summarizer for RuleBasedSummarizer {
    fn name(&self) -> &str {
        "rule"
    }

    async fn summarize(&self, text: &str) -> Result<Summary> {
        Ok(self.summarize_sync(text))
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
