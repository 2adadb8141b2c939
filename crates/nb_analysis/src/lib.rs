pub mod canonical;
pub mod cluster;
pub mod dedupe;
pub mod fingerprint;
pub mod pipeline;
pub mod rank;
pub mod similarity;
pub mod sort;
pub mod trends;
pub mod vector;
pub mod window;

mod union_find;

pub use canonical::{canonicalize, is_probable_article};
pub use cluster::{cluster_articles, cluster_articles_at};
pub use dedupe::{dedupe_articles, Deduplicator, DuplicateStage};
pub use fingerprint::fingerprint;
pub use pipeline::Pipeline;
pub use similarity::title_similarity;
pub use sort::{stable_sort, SortOrder};
pub use trends::{build_trends, build_trends_at};
pub use vector::{terms, vectorize, TermVector};
pub use window::{
    filter_with_auto_relax, filter_with_auto_relax_at, ArticleQuery, FilterOutcome, Period,
    RelaxNotice, TopicFilter,
};

pub mod prelude {
    pub use super::pipeline::Pipeline;
    pub use super::sort::SortOrder;
    pub use super::window::{ArticleQuery, Period, TopicFilter};
    pub use nb_core::{AnalysisConfig, Article, Cluster, Error, Feed, Result, TrendSnapshot};
}
