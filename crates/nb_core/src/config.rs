use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_TITLE_THRESHOLD: f64 = 0.92;
pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 0.28;
pub const DEFAULT_TREND_DAYS: u32 = 7;
pub const DEFAULT_TREND_TOP_N: usize = 10;
pub const DEFAULT_MAX_ARTICLES: usize = 300;
pub const DEFAULT_CONTENT_CHARS: usize = 400;
pub const DEFAULT_SUMMARIZER_STRATEGY: &str = "rule";

/// Knobs for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum title similarity for two articles to be treated as duplicates
    pub title_threshold: f64,
    /// Minimum cosine similarity for two articles to share a cluster
    pub cluster_threshold: f64,
    pub trend_days: u32,
    pub trend_top_n: usize,
    /// Raw records beyond this count are ignored at ingest
    pub max_articles: usize,
    /// Characters of body text kept on each article for fingerprinting
    pub content_chars: usize,
    pub summarizer_strategy: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            title_threshold: DEFAULT_TITLE_THRESHOLD,
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
            trend_days: DEFAULT_TREND_DAYS,
            trend_top_n: DEFAULT_TREND_TOP_N,
            max_articles: DEFAULT_MAX_ARTICLES,
            content_chars: DEFAULT_CONTENT_CHARS,
            summarizer_strategy: DEFAULT_SUMMARIZER_STRATEGY.to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("title_threshold", self.title_threshold)?;
        check_unit_interval("cluster_threshold", self.cluster_threshold)?;
        if self.trend_top_n == 0 {
            return Err(Error::Config("trend_top_n must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::Config(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}
