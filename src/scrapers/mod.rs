pub mod browser;
pub mod http;
pub mod olx;
pub mod traits;
pub mod types;

pub use browser::BrowserFetcher;
pub use http::HttpFetcher;
pub use olx::ListingExtractor;
pub use traits::PageFetcher;
pub use types::{FetchOptions, FetcherKind};

use anyhow::Result;
use std::time::Duration;

/// Build the page fetcher selected in configuration
pub fn build_fetcher(kind: FetcherKind, timeout: Duration) -> Result<Box<dyn PageFetcher>> {
    Ok(match kind {
        FetcherKind::Http => Box::new(HttpFetcher::new(timeout)?),
        FetcherKind::Browser => Box::new(BrowserFetcher::new(timeout)?),
    })
}
