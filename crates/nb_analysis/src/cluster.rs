use chrono::{DateTime, SecondsFormat, Utc};
use nb_core::{Article, Cluster};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::rank::top_by_frequency;
use crate::union_find::UnionFind;
use crate::vector::TermVector;

const CLUSTER_KEYWORDS: usize = 5;
const SUMMARY_MEMBERS: usize = 2;
const SUMMARY_SEPARATOR: &str = " / ";

/// Groups related articles: any pair whose title+summary cosine similarity
/// reaches `threshold` is connected, and connected components of two or more
/// articles become clusters.
///
/// Returns the articles regrouped by component (components in order of their
/// first member, members in input order) with `cluster_id` set, and the
/// clusters numbered `cluster-001`, `cluster-002`, ... in the same order.
/// Both depend on input order.
pub fn cluster_articles(articles: Vec<Article>, threshold: f64) -> (Vec<Article>, Vec<Cluster>) {
    cluster_articles_at(articles, threshold, Utc::now())
}

pub fn cluster_articles_at(
    mut articles: Vec<Article>,
    threshold: f64,
    now: DateTime<Utc>,
) -> (Vec<Article>, Vec<Cluster>) {
    let n = articles.len();
    debug!("Clustering started - articles={}, threshold={}", n, threshold);

    let vectors: Vec<TermVector> = articles
        .par_iter()
        .map(|article| TermVector::from_text(&article.search_text()))
        .collect();

    let pairs = similar_pairs(&vectors, threshold);
    let mut sets = UnionFind::new(n);
    for &(i, j) in &pairs {
        sets.union(i, j);
    }
    let groups = sets.components();

    let updated_at = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut clusters = Vec::new();
    for group in &groups {
        let cluster_id = if group.len() > 1 {
            let cluster_id = format!("cluster-{:03}", clusters.len() + 1);
            let members: Vec<&Article> = group.iter().map(|&idx| &articles[idx]).collect();
            clusters.push(build_cluster(&cluster_id, &members, &updated_at));
            Some(cluster_id)
        } else {
            None
        };
        for &idx in group {
            articles[idx].cluster_id = cluster_id.clone();
        }
    }

    let mut slots: Vec<Option<Article>> = articles.into_iter().map(Some).collect();
    let regrouped: Vec<Article> = groups
        .iter()
        .flatten()
        .filter_map(|&idx| slots[idx].take())
        .collect();

    info!(
        "Clustering finished - articles={}, similar_pairs={}, clusters={}",
        n,
        pairs.len(),
        clusters.len()
    );
    (regrouped, clusters)
}

/// All `(i, j)`, `i < j`, whose cosine similarity reaches `threshold`, in
/// lexicographic order. Rows are scored in parallel; the result is the same
/// as a sequential scan.
fn similar_pairs(vectors: &[TermVector], threshold: f64) -> Vec<(usize, usize)> {
    let n = vectors.len();
    (0..n)
        .into_par_iter()
        .flat_map_iter(move |i| {
            (i + 1..n)
                .filter(move |&j| vectors[i].cosine(&vectors[j]) >= threshold)
                .map(move |j| (i, j))
        })
        .collect()
}

fn build_cluster(cluster_id: &str, members: &[&Article], updated_at: &str) -> Cluster {
    let mut by_recency: Vec<&Article> = members.to_vec();
    by_recency.sort_by(|a, b| b.published_key().cmp(&a.published_key()));

    let cluster_title = by_recency
        .first()
        .map(|a| a.title.clone())
        .unwrap_or_default();

    // Build order, not date order
    let cluster_summary = members
        .iter()
        .take(SUMMARY_MEMBERS)
        .map(|a| a.summary.as_str())
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR);

    let keywords = top_by_frequency(
        members.iter().flat_map(|a| a.keywords.iter()),
        CLUSTER_KEYWORDS,
    )
    .into_iter()
    .map(|(keyword, _)| keyword)
    .collect();

    Cluster {
        cluster_id: cluster_id.to_string(),
        cluster_title,
        cluster_summary,
        keywords,
        article_ids: by_recency.iter().map(|a| a.id.clone()).collect(),
        updated_at: updated_at.to_string(),
    }
}
