use crate::dates::{is_sentinel, normalize_date};
use crate::models::ListingRecord;
use chrono::{Duration, NaiveDateTime};

/// Keep listings posted today or yesterday, newest first.
///
/// Listings on the same moment keep their input order.
pub fn filter_recent(mut listings: Vec<ListingRecord>, now: NaiveDateTime) -> Vec<ListingRecord> {
    for listing in &mut listings {
        listing.normalized_date = normalize_date(&listing.date_posted, now);
    }

    listings.sort_by(|a, b| b.normalized_date.cmp(&a.normalized_date));

    let today = now.date();
    let yesterday = today - Duration::days(1);

    listings
        .into_iter()
        .filter(|l| !is_sentinel(l.normalized_date))
        .filter(|l| {
            let day = l.normalized_date.date();
            day == today || day == yesterday
        })
        .collect()
}
