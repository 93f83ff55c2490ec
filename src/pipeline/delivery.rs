use crate::models::ListingRecord;
use crate::notify::{format_listing, Notifier, NOTHING_NEW};
use crate::store::DedupStore;
use std::collections::HashSet;
use tracing::{error, info, warn};

/// Outcome of one delivery pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub new_listings: usize,
    pub delivered: usize,
    pub failed: usize,
    pub store_saved: bool,
}

/// Listings whose link is not yet in the store, first occurrence of each link only
pub fn new_listings(listings: Vec<ListingRecord>, store: &DedupStore) -> Vec<ListingRecord> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|l| !store.contains(&l.link))
        .filter(|l| seen.insert(l.link.clone()))
        .collect()
}

/// Send new listings one at a time, remembering only the confirmed ones.
///
/// The store is saved once after the batch when there was anything to send.
/// With nothing new a single notice is sent and the store is left untouched.
pub async fn deliver(
    listings: Vec<ListingRecord>,
    store: &mut DedupStore,
    notifier: &dyn Notifier,
    persist: bool,
) -> DeliveryReport {
    let fresh = new_listings(listings, store);
    let mut report = DeliveryReport {
        new_listings: fresh.len(),
        ..DeliveryReport::default()
    };

    if fresh.is_empty() {
        info!("⚠️ No new listings found");
        if let Err(e) = notifier.send(NOTHING_NEW).await {
            warn!(error = %format!("{e:#}"), notifier = notifier.name(), "Failed to send nothing-new notice");
        }
        return report;
    }

    info!(count = fresh.len(), "Delivering new listings");

    for listing in &fresh {
        info!(title = %listing.title, price = %listing.price, link = %listing.link, "🏠 New listing");

        match notifier.send(&format_listing(listing)).await {
            Ok(()) => {
                store.add(listing.link.clone());
                report.delivered += 1;
            }
            Err(e) => {
                warn!(link = %listing.link, error = %format!("{e:#}"), "Delivery failed; will retry next run");
                report.failed += 1;
            }
        }
    }

    if persist {
        match store.save().await {
            Ok(()) => report.store_saved = true,
            Err(e) => error!(path = %store.path().display(), error = %format!("{e:#}"), "Failed to save sent links"),
        }
    }

    report
}
