use async_trait::async_trait;
use crate::types::Summary;
use crate::Result;

#[async_trait]
pub trait Summarizer: Send + Sync + std::fmt::Debug {
    /// Short name used in logs and for strategy selection
    fn name(&self) -> &str;

    /// Produce a summary, up to four key sentences and keywords for raw article text
    async fn summarize(&self, text: &str) -> Result<Summary>;
}
