pub mod ingest;
pub mod models;

pub mod prelude {
    pub use super::ingest::ingest;
    pub use super::models::{create_summarizer, RuleBasedSummarizer};
    pub use nb_core::{AnalysisConfig, Article, Error, RawArticle, Result, Summarizer, Summary};
}

pub use ingest::ingest;
pub use models::create_summarizer;
