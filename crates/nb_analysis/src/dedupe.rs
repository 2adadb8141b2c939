use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use nb_core::Article;
use tracing::{debug, info};

use crate::canonical::canonicalize;
use crate::fingerprint::fingerprint;
use crate::similarity::title_similarity;

/// Representatives kept so far, plus every URL and content hash seen, each
/// mapped to the slot of the representative that absorbed it.
///
/// Read-only surface for [`DuplicateStage::lookup`]; only the deduplicator
/// mutates it.
#[derive(Debug, Default)]
pub struct DedupIndex {
    kept: Vec<Article>,
    by_url: HashMap<String, usize>,
    by_hash: HashMap<String, usize>,
}

impl DedupIndex {
    pub fn kept(&self) -> &[Article] {
        &self.kept
    }

    pub fn slot_for_url(&self, canonical_url: &str) -> Option<usize> {
        self.by_url.get(canonical_url).copied()
    }

    pub fn slot_for_hash(&self, hash: &str) -> Option<usize> {
        self.by_hash.get(hash).copied()
    }

    fn register(&mut self, slot: usize, article: &Article) {
        if !article.canonical_url.is_empty() {
            self.by_url.insert(article.canonical_url.clone(), slot);
        }
        if let Some(hash) = &article.content_hash {
            self.by_hash.insert(hash.clone(), slot);
        }
    }

    fn push(&mut self, article: Article) {
        let slot = self.kept.len();
        self.register(slot, &article);
        self.kept.push(article);
    }

    /// Merges `incoming` into the representative at `slot`, keeping whichever
    /// wins the tie-break, and points both articles' keys at the slot.
    fn absorb(&mut self, slot: usize, incoming: Article) {
        self.register(slot, &incoming);
        if prefer_incoming(&self.kept[slot], &incoming) {
            debug!(
                "Article {} replaces {} as representative",
                incoming.id, self.kept[slot].id
            );
            self.kept[slot] = incoming;
        }
    }

    fn into_kept(self) -> Vec<Article> {
        self.kept
    }
}

/// One step of the duplicate cascade: finds the representative slot a
/// candidate duplicates, if any.
pub trait DuplicateStage: Send + Sync {
    fn name(&self) -> &'static str;

    fn lookup(&self, index: &DedupIndex, candidate: &Article) -> Option<usize>;
}

/// Exact match on canonical URL.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanonicalUrlStage;

impl DuplicateStage for CanonicalUrlStage {
    fn name(&self) -> &'static str {
        "canonical_url"
    }

    fn lookup(&self, index: &DedupIndex, candidate: &Article) -> Option<usize> {
        if candidate.canonical_url.is_empty() {
            return None;
        }
        index.slot_for_url(&candidate.canonical_url)
    }
}

/// Exact match on normalized body fingerprint.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentHashStage;

impl DuplicateStage for ContentHashStage {
    fn name(&self) -> &'static str {
        "content_hash"
    }

    fn lookup(&self, index: &DedupIndex, candidate: &Article) -> Option<usize> {
        index.slot_for_hash(candidate.content_hash.as_deref()?)
    }
}

/// First kept representative whose title is similar enough.
#[derive(Debug, Clone, Copy)]
pub struct TitleSimilarityStage {
    pub threshold: f64,
}

impl DuplicateStage for TitleSimilarityStage {
    fn name(&self) -> &'static str {
        "title_similarity"
    }

    fn lookup(&self, index: &DedupIndex, candidate: &Article) -> Option<usize> {
        if candidate.title.trim().is_empty() {
            return None;
        }
        index
            .kept()
            .iter()
            .position(|kept| title_similarity(&kept.title, &candidate.title) >= self.threshold)
    }
}

/// Collapses duplicate articles in one left-to-right pass through an ordered
/// cascade of stages.
pub struct Deduplicator {
    stages: Vec<Box<dyn DuplicateStage>>,
}

impl fmt::Debug for Deduplicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deduplicator")
            .field(
                "stages",
                &self.stages.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Deduplicator {
    /// URL, then content hash, then title similarity.
    pub fn new(title_threshold: f64) -> Self {
        Self::with_stages(vec![
            Box::new(CanonicalUrlStage),
            Box::new(ContentHashStage),
            Box::new(TitleSimilarityStage {
                threshold: title_threshold,
            }),
        ])
    }

    pub fn with_stages(stages: Vec<Box<dyn DuplicateStage>>) -> Self {
        Self { stages }
    }

    /// Returns one representative per duplicate group, in the order each
    /// group was first seen. `canonical_url` and `content_hash` are
    /// recomputed on every article.
    pub fn dedupe(&self, articles: Vec<Article>) -> Vec<Article> {
        let total = articles.len();
        let mut index = DedupIndex::default();

        for mut article in articles {
            article.canonical_url = canonicalize(&article.canonical_url);
            article.content_hash = fingerprint(article.content_text.as_deref());

            let matched = self.stages.iter().find_map(|stage| {
                stage
                    .lookup(&index, &article)
                    .map(|slot| (stage.name(), slot))
            });

            match matched {
                Some((stage, slot)) => {
                    debug!(
                        "Article {} duplicates {} ({})",
                        article.id, index.kept[slot].id, stage
                    );
                    index.absorb(slot, article);
                }
                None => index.push(article),
            }
        }

        let kept = index.into_kept();
        info!(
            "Deduplication finished - input={}, kept={}, merged={}",
            total,
            kept.len(),
            total - kept.len()
        );
        kept
    }
}

pub fn dedupe_articles(articles: Vec<Article>, title_threshold: f64) -> Vec<Article> {
    Deduplicator::new(title_threshold).dedupe(articles)
}

/// Longer body wins; on equal length the later publication wins; otherwise
/// the existing representative stays.
fn prefer_incoming(existing: &Article, incoming: &Article) -> bool {
    match incoming.content_len().cmp(&existing.content_len()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => incoming.published_key() > existing.published_key(),
    }
}
