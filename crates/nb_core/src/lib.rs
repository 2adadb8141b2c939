pub mod config;
pub mod error;
pub mod models;
pub mod types;

pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use models::Summarizer;
pub use types::{
    Article, Cluster, Feed, KeywordCount, RawArticle, SourceCount, Summary, Topic, TopicRatio,
    TrendSnapshot,
};
