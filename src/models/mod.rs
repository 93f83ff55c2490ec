use chrono::NaiveDateTime;
use serde::Serialize;

use crate::dates::SENTINEL_DATE;

/// Placeholder for any text field that could not be extracted
pub const UNKNOWN: &str = "N/A";

/// Placeholder link for cards without a usable anchor
pub const NO_LINK: &str = "#";

/// One advertisement observed on a search-results page
#[derive(Debug, Clone, Serialize)]
pub struct ListingRecord {
    pub title: String,
    pub price: String,
    pub price_per_area: String,
    pub location: String,
    pub date_posted: String,
    /// Absolute URL of the ad; identity key for deduplication
    pub link: String,
    #[serde(skip)]
    pub normalized_date: NaiveDateTime,
}

impl ListingRecord {
    /// Build a record from optional fields, substituting sentinels for anything missing
    pub fn from_parts(
        title: Option<String>,
        price: Option<String>,
        price_per_area: Option<String>,
        location_date: Option<(String, String)>,
        link: Option<String>,
    ) -> Self {
        let (location, date_posted) = location_date
            .unwrap_or_else(|| (UNKNOWN.to_string(), UNKNOWN.to_string()));

        Self {
            title: title.unwrap_or_else(|| UNKNOWN.to_string()),
            price: price.unwrap_or_else(|| UNKNOWN.to_string()),
            price_per_area: price_per_area.unwrap_or_else(|| UNKNOWN.to_string()),
            location,
            date_posted,
            link: link.unwrap_or_else(|| NO_LINK.to_string()),
            normalized_date: SENTINEL_DATE,
        }
    }

    pub fn has_link(&self) -> bool {
        !self.link.is_empty() && self.link != NO_LINK
    }

    /// Compact JSON form for debug logs
    pub fn to_log_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("<unserializable listing: {e}>"))
    }
}
