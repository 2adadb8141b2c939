use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A `published_at` value could not be read as an RFC 3339 instant while
    /// it had to be compared against the clock.
    #[error("Invalid timestamp {value:?} on article {article_id}: {source}")]
    InvalidTimestamp {
        article_id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid period: {0} (expected one of 24h, 7d, 30d, all)")]
    InvalidPeriod(String),

    #[error("Invalid sort order: {0} (expected latest or oldest)")]
    InvalidOrder(String),

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
