use anyhow::Result;
use async_trait::async_trait;

/// Page retrieval capability shared by the plain HTTP and headless browser fetchers
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Retrieve the HTML of a search-results page
    async fn fetch(&self, url: &str) -> Result<String>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
