//! One notifier run: collect, filter, diff against what was sent, deliver.

pub mod delivery;
pub mod recency;
pub mod sources;

#[cfg(test)]
pub mod testing;

pub use delivery::{deliver, DeliveryReport};
pub use recency::filter_recent;
pub use sources::collect_listings;

use crate::config::Config;
use crate::notify::Notifier;
use crate::scrapers::{ListingExtractor, PageFetcher};
use crate::store::DedupStore;
use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::info;

/// Counts reported at the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub scraped: usize,
    pub recent: usize,
    /// Links known to the store after delivery
    pub known_links: usize,
    pub delivery: DeliveryReport,
}

/// Execute one run with `now` as the reference time for recency
pub async fn run(
    config: &Config,
    fetcher: &dyn PageFetcher,
    notifier: &dyn Notifier,
    now: NaiveDateTime,
) -> Result<RunSummary> {
    let extractor = ListingExtractor::new(&config.base_url)?;
    let sources = config.sources();

    let listings = collect_listings(fetcher, &extractor, &sources, &config.fetch_options()).await;
    let scraped = listings.len();

    let recent = filter_recent(listings, now);
    info!(scraped, recent = recent.len(), "✅ Listings posted today or yesterday");

    let mut store = DedupStore::load(&config.store).await;
    if store.is_empty() {
        info!("Sent-links store is empty; every recent listing counts as new");
    } else {
        info!(known = store.len(), "Loaded sent links");
    }
    let recent_count = recent.len();
    let delivery = deliver(recent, &mut store, notifier, !config.dry_run).await;

    Ok(RunSummary {
        scraped,
        recent: recent_count,
        known_links: store.len(),
        delivery,
    })
}
