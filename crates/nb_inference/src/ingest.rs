use nb_analysis::{canonicalize, is_probable_article};
use nb_core::{AnalysisConfig, Article, RawArticle, Result, Summarizer};
use tracing::{debug, info};

/// Status assumed for a source URL that was never checked.
pub const DEFAULT_STATUS_CODE: u16 = 200;

const MAX_KEY_POINTS: usize = 4;

/// Turns collected records into articles: summarizes each body, derives the
/// canonical URL and keeps a bounded prefix of the body for fingerprinting.
/// Records past `config.max_articles` are dropped.
pub async fn ingest(
    raw: Vec<RawArticle>,
    summarizer: &dyn Summarizer,
    config: &AnalysisConfig,
) -> Result<Vec<Article>> {
    let total = raw.len();
    let mut articles = Vec::with_capacity(total.min(config.max_articles));

    for item in raw.into_iter().take(config.max_articles) {
        let mut summary = summarizer.summarize(&item.content).await?;
        summary.key_points.truncate(MAX_KEY_POINTS);

        let canonical_url = canonicalize(&item.url);
        let is_valid_source_url = is_probable_article(&canonical_url);
        if !is_valid_source_url {
            debug!("Article {} links to a section page: {}", item.id, canonical_url);
        }

        articles.push(Article {
            id: item.id,
            title: item.title,
            source_name: item.source_name,
            source_url: item.source_url,
            published_at: item.published_at,
            topic: item.topic,
            canonical_url,
            original_url: item.url,
            is_valid_source_url,
            source_url_status_code: Some(item.status_code.unwrap_or(DEFAULT_STATUS_CODE)),
            summary: summary.summary,
            key_points: summary.key_points,
            keywords: summary.keywords,
            content_text: Some(item.content.chars().take(config.content_chars).collect()),
            cluster_id: None,
            content_hash: None,
        });
    }

    info!(
        "Ingest finished - records={}, articles={}, summarizer={}",
        total,
        articles.len(),
        summarizer.name()
    );
    Ok(articles)
}
