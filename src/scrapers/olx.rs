//! Listing extraction for OLX search-result pages.
//!
//! Every card is read field by field. A field that is missing or malformed
//! falls back to its sentinel without affecting the rest of the card, so one
//! odd advertisement never costs the others.

use crate::models::ListingRecord;
use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

/// Structural selector for one listing card
pub const CARD_SELECTOR: &str = "div[data-cy='l-card']";

const TITLE_SELECTOR: &str = "h6, h4";
const TITLE_IMAGE_SELECTOR: &str = "img[alt]";
const PRICE_SELECTOR: &str = "p[data-testid='ad-price']";
const TEXT_SELECTOR: &str = "p, span";
const LOCATION_DATE_SELECTOR: &str = "p[data-testid='location-date']";
const LINK_SELECTOR: &str = "a[href]";

/// Marker identifying the price-per-area text among a card's paragraphs
const PRICE_PER_AREA_MARKER: &str = "zł/m²";
const LOCATION_DATE_SEPARATOR: &str = " - ";

/// Turns one search-results page into listing records
pub struct ListingExtractor {
    base_url: Url,
    card: Selector,
    title: Selector,
    title_image: Selector,
    price: Selector,
    text: Selector,
    location_date: Selector,
    link: Selector,
}

impl ListingExtractor {
    /// Create an extractor resolving relative links against `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| anyhow!("Invalid base URL {base_url:?}: {e}"))?;

        Ok(Self {
            base_url,
            card: selector(CARD_SELECTOR)?,
            title: selector(TITLE_SELECTOR)?,
            title_image: selector(TITLE_IMAGE_SELECTOR)?,
            price: selector(PRICE_SELECTOR)?,
            text: selector(TEXT_SELECTOR)?,
            location_date: selector(LOCATION_DATE_SELECTOR)?,
            link: selector(LINK_SELECTOR)?,
        })
    }

    /// Extract every card that carries a resolvable link, in page order
    pub fn extract(&self, html: &str) -> Vec<ListingRecord> {
        let document = Html::parse_document(html);
        let mut listings = Vec::new();

        for (idx, card) in document.select(&self.card).enumerate() {
            let record = self.extract_card(card);

            if !record.has_link() {
                debug!(idx, title = %record.title, "Skipping card without link");
                continue;
            }

            debug!(idx, listing = %record.to_log_json(), "Extracted listing");
            listings.push(record);
        }

        listings
    }

    fn extract_card(&self, card: ElementRef<'_>) -> ListingRecord {
        ListingRecord::from_parts(
            self.title(card),
            first_text(card, &self.price),
            self.price_per_area(card),
            self.location_date(card),
            self.link(card),
        )
    }

    fn title(&self, card: ElementRef<'_>) -> Option<String> {
        first_text(card, &self.title).or_else(|| {
            card.select(&self.title_image)
                .next()
                .and_then(|img| img.value().attr("alt"))
                .map(collapse_whitespace)
                .filter(|alt| !alt.is_empty())
        })
    }

    fn price_per_area(&self, card: ElementRef<'_>) -> Option<String> {
        card.select(&self.text)
            .map(inner_text)
            .find(|text| text.contains(PRICE_PER_AREA_MARKER))
    }

    fn location_date(&self, card: ElementRef<'_>) -> Option<(String, String)> {
        let text = first_text(card, &self.location_date)?;
        let (location, date) = text.split_once(LOCATION_DATE_SEPARATOR)?;

        Some((location.trim().to_string(), date.trim().to_string()))
    }

    fn link(&self, card: ElementRef<'_>) -> Option<String> {
        let href = card.select(&self.link).next()?.value().attr("href")?.trim();
        if href.is_empty() {
            return None;
        }

        match self.base_url.join(href) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                debug!(%href, error = %e, "Could not resolve listing link");
                None
            }
        }
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {css:?}: {e}"))
}

/// Rendered text of the first match, if it has any
fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(inner_text)
        .filter(|text| !text.is_empty())
}

fn inner_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
