use crate::models::ListingRecord;

/// Sent when a run finds nothing that has not been reported already
pub const NOTHING_NEW: &str = "👀 Nothing new found for now.";

const LINK_LABEL: &str = "Zobacz ogłoszenie";

/// Render a listing as Telegram HTML
pub fn format_listing(listing: &ListingRecord) -> String {
    format!(
        "<b>{title}</b>\n\
         💰 <b>{price}</b>\n\
         📐 {per_area}\n\
         📍 {location} — 🗓 {date}\n\
         🔗 <a href=\"{link}\">{label}</a>",
        title = escape_html(&listing.title),
        price = escape_html(&listing.price),
        per_area = escape_html(&listing.price_per_area),
        location = escape_html(&listing.location),
        date = escape_html(&listing.date_posted),
        link = escape_html(&listing.link),
        label = LINK_LABEL,
    )
}

/// Escape the characters Telegram's HTML parse mode treats as markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
