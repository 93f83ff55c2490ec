use crate::models::ListingRecord;
use crate::scrapers::{FetchOptions, ListingExtractor, PageFetcher};
use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

/// Fetch and extract every source, concatenating results in source order.
///
/// A source that fails or exceeds the timeout is logged and contributes
/// nothing; the others are unaffected.
pub async fn collect_listings(
    fetcher: &dyn PageFetcher,
    extractor: &ListingExtractor,
    sources: &[String],
    options: &FetchOptions,
) -> Vec<ListingRecord> {
    let per_source: Vec<Vec<ListingRecord>> = stream::iter(sources)
        .map(|url| async move {
            info!(%url, fetcher = fetcher.name(), "🌍 Scraping source");
            match fetch_page(fetcher, url, options).await {
                Ok(html) => {
                    let listings = extractor.extract(&html);
                    info!(%url, count = listings.len(), "Extracted listings");
                    listings
                }
                Err(e) => {
                    warn!(%url, error = %format!("{e:#}"), "Skipping source");
                    Vec::new()
                }
            }
        })
        .buffered(options.concurrency.max(1))
        .collect()
        .await;

    per_source.into_iter().flatten().collect()
}

async fn fetch_page(fetcher: &dyn PageFetcher, url: &str, options: &FetchOptions) -> Result<String> {
    match tokio::time::timeout(options.timeout, fetcher.fetch(url)).await {
        Ok(result) => result,
        Err(_) => anyhow::bail!("Timed out after {:?}", options.timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::{card, FakeFetcher};
    use std::time::Duration;

    fn sources(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[tokio::test]
    async fn test_concatenates_in_source_order() {
        let fetcher = FakeFetcher::default()
            .page("https://src/1", &[card("/a1", "Dzisiaj"), card("/a2", "Dzisiaj")])
            .page("https://src/2", &[card("/b1", "Wczoraj")]);
        let extractor = ListingExtractor::new("https://www.olx.pl").unwrap();

        let listings = collect_listings(
            &fetcher,
            &extractor,
            &sources(&["https://src/1", "https://src/2"]),
            &FetchOptions::default(),
        )
        .await;

        let links: Vec<_> = listings.iter().map(|l| l.link.as_str()).collect();
        assert_eq!(
            links,
            [
                "https://www.olx.pl/a1",
                "https://www.olx.pl/a2",
                "https://www.olx.pl/b1"
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_source_is_skipped() {
        let fetcher = FakeFetcher::default()
            .failing("https://src/1")
            .page("https://src/2", &[card("/b1", "Dzisiaj")]);
        let extractor = ListingExtractor::new("https://www.olx.pl").unwrap();

        let listings = collect_listings(
            &fetcher,
            &extractor,
            &sources(&["https://src/1", "https://src/2", "https://src/unknown"]),
            &FetchOptions::default(),
        )
        .await;

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].link, "https://www.olx.pl/b1");
    }

    #[tokio::test]
    async fn test_concurrent_fetch_keeps_order() {
        let fetcher = FakeFetcher::default()
            .page("https://src/1", &[card("/a1", "Dzisiaj")])
            .page("https://src/2", &[card("/b1", "Dzisiaj")])
            .page("https://src/3", &[card("/c1", "Dzisiaj")])
            .delay("https://src/1", Duration::from_millis(50));
        let extractor = ListingExtractor::new("https://www.olx.pl").unwrap();
        let options = FetchOptions {
            concurrency: 3,
            ..FetchOptions::default()
        };

        let listings = collect_listings(
            &fetcher,
            &extractor,
            &sources(&["https://src/1", "https://src/2", "https://src/3"]),
            &options,
        )
        .await;

        let links: Vec<_> = listings.iter().map(|l| l.link.as_str()).collect();
        assert_eq!(
            links,
            [
                "https://www.olx.pl/a1",
                "https://www.olx.pl/b1",
                "https://www.olx.pl/c1"
            ]
        );
    }

    #[tokio::test]
    async fn test_stalled_source_times_out() {
        let fetcher = FakeFetcher::default()
            .page("https://src/1", &[card("/a1", "Dzisiaj")])
            .delay("https://src/1", Duration::from_secs(60))
            .page("https://src/2", &[card("/b1", "Dzisiaj")]);
        let extractor = ListingExtractor::new("https://www.olx.pl").unwrap();
        let options = FetchOptions {
            timeout: Duration::from_millis(50),
            concurrency: 1,
        };

        let listings = collect_listings(
            &fetcher,
            &extractor,
            &sources(&["https://src/1", "https://src/2"]),
            &options,
        )
        .await;

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].link, "https://www.olx.pl/b1");
    }
}
