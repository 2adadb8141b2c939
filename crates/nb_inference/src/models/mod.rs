use std::sync::Arc;

use nb_core::{Error, Result, Summarizer};
use tracing::info;

pub mod rule;

pub use rule::RuleBasedSummarizer;

/// Strategy names accepted by [`create_summarizer`].
pub const STRATEGIES: &[&str] = &["rule"];

pub fn create_summarizer(strategy: &str) -> Result<Arc<dyn Summarizer>> {
    let summarizer: Arc<dyn Summarizer> = match strategy.trim().to_lowercase().as_str() {
        "rule" => Arc::new(RuleBasedSummarizer::new()),
        other => {
            return Err(Error::Summarization(format!(
                "unknown summarizer strategy {:?}, expected one of {:?}",
                other, STRATEGIES
            )))
        }
    };
    info!("Using {} summarizer", summarizer.name());
    Ok(summarizer)
}
