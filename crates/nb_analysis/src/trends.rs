use chrono::{DateTime, Duration, Utc};
use nb_core::{Article, KeywordCount, Result, SourceCount, Topic, TopicRatio, TrendSnapshot};
use tracing::{debug, info};

use crate::rank::{count_in_order, top_by_frequency};

pub fn build_trends(articles: &[Article], days: u32, top_n: usize) -> Result<TrendSnapshot> {
    build_trends_at(articles, days, top_n, Utc::now())
}

/// Keyword, source and topic statistics over articles published within the
/// last `days` days. A window reaching past the earliest representable
/// instant counts every article as recent. Labels outside the known topics
/// are not counted in `topic_ratio`.
pub fn build_trends_at(
    articles: &[Article],
    days: u32,
    top_n: usize,
    now: DateTime<Utc>,
) -> Result<TrendSnapshot> {
    let cutoff = now.checked_sub_signed(Duration::days(i64::from(days)));

    let mut recent = Vec::new();
    for article in articles {
        match cutoff {
            Some(cutoff) if article.published_at_utc()? < cutoff => {}
            _ => recent.push(article),
        }
    }
    debug!("{} of {} articles within {} days", recent.len(), articles.len(), days);

    let keywords_top = top_by_frequency(recent.iter().flat_map(|a| a.keywords.iter()), top_n)
        .into_iter()
        .map(|(keyword, count)| KeywordCount { keyword, count })
        .collect();

    let source_distribution = count_in_order(recent.iter().map(|a| a.source_name.as_str()))
        .into_iter()
        .map(|(source, count)| SourceCount { source, count })
        .collect();

    let mut topic_ratio = TopicRatio::default();
    for article in &recent {
        match Topic::from_label(&article.topic) {
            Some(topic) => topic_ratio.record(topic),
            None => debug!("Article {} has unknown topic {:?}", article.id, article.topic),
        }
    }

    info!(
        "Trends built - recent={}, keywords={}, topics={}",
        recent.len(),
        top_n,
        topic_ratio.total()
    );

    Ok(TrendSnapshot {
        recent_days: days,
        keywords_top,
        source_distribution,
        topic_ratio,
    })
}
