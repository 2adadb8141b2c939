use chrono::{DateTime, SecondsFormat, Utc};
use nb_core::{AnalysisConfig, Article, Feed, Result};
use tracing::info;

use crate::cluster::cluster_articles_at;
use crate::dedupe::Deduplicator;
use crate::trends::build_trends_at;

pub const FEED_MODE: &str = "static";

/// Dedupe, cluster and trend aggregation over one batch of articles.
#[derive(Debug)]
pub struct Pipeline {
    config: AnalysisConfig,
    deduplicator: Deduplicator,
}

impl Pipeline {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let deduplicator = Deduplicator::new(config.title_threshold);
        Ok(Self { config, deduplicator })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn run(&self, articles: Vec<Article>) -> Result<Feed> {
        self.run_at(articles, Utc::now())
    }

    pub fn run_at(&self, articles: Vec<Article>, now: DateTime<Utc>) -> Result<Feed> {
        let input = articles.len();
        let deduped = self.deduplicator.dedupe(articles);
        let (items, clusters) = cluster_articles_at(deduped, self.config.cluster_threshold, now);
        let trends = build_trends_at(&items, self.config.trend_days, self.config.trend_top_n, now)?;

        info!(
            "Pipeline finished - input={}, items={}, clusters={}",
            input,
            items.len(),
            clusters.len()
        );

        Ok(Feed {
            mode: FEED_MODE.to_string(),
            items,
            clusters,
            trends,
            generated_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }
}
