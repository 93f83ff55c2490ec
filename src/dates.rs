use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Timestamp used when a posting date cannot be understood; sorts last
pub const SENTINEL_DATE: NaiveDateTime = NaiveDateTime::MIN;

/// Polish month names in the genitive form used by OLX ("15 października")
const MONTHS: [&str; 12] = [
    "stycznia",
    "lutego",
    "marca",
    "kwietnia",
    "maja",
    "czerwca",
    "lipca",
    "sierpnia",
    "września",
    "października",
    "listopada",
    "grudnia",
];

/// Convert an OLX posting-date phrase into a local timestamp.
///
/// Understands "dzisiaj ..." (today, returns `now`), "wczoraj ..." (yesterday
/// at midnight) and "<day> <month>" (midnight of that day in `now`'s year).
/// Anything else yields [`SENTINEL_DATE`].
pub fn normalize_date(text: &str, now: NaiveDateTime) -> NaiveDateTime {
    let text = text.to_lowercase();

    if text.contains("dzisiaj") {
        return now;
    }

    if text.contains("wczoraj") {
        return (now.date() - Duration::days(1)).and_time(chrono::NaiveTime::MIN);
    }

    parse_day_month(&text, now.year()).unwrap_or(SENTINEL_DATE)
}

pub fn is_sentinel(ts: NaiveDateTime) -> bool {
    ts == SENTINEL_DATE
}

fn parse_day_month(text: &str, year: i32) -> Option<NaiveDateTime> {
    let mut tokens = text.split_whitespace();
    let day: u32 = tokens.next()?.parse().ok()?;
    let month_word = tokens.next()?;
    let month = MONTHS.iter().position(|m| *m == month_word)? as u32 + 1;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

/// Genitive month name for a 1-based month number
#[cfg(test)]
pub fn month_name(month: u32) -> &'static str {
    MONTHS[(month - 1) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_today_returns_now() {
        let now = at(2024, 10, 17, 14, 30);
        assert_eq!(normalize_date("Dzisiaj o 12:05", now), now);
        assert_eq!(normalize_date("DZISIAJ", now), now);
        assert_eq!(normalize_date("Odświeżono dzisiaj o 09:00", now), now);
    }

    #[test]
    fn test_yesterday_returns_previous_midnight() {
        let now = at(2024, 10, 17, 14, 30);
        assert_eq!(normalize_date("Wczoraj o 23:59", now), at(2024, 10, 16, 0, 0));
    }

    #[test]
    fn test_yesterday_crosses_year_boundary() {
        let now = at(2025, 1, 1, 8, 0);
        assert_eq!(normalize_date("wczoraj", now), at(2024, 12, 31, 0, 0));
    }

    #[test]
    fn test_today_wins_over_yesterday() {
        let now = at(2024, 10, 17, 14, 30);
        assert_eq!(normalize_date("dzisiaj / wczoraj", now), now);
    }

    #[test]
    fn test_day_month_uses_current_year() {
        let now = at(2024, 10, 17, 14, 30);
        assert_eq!(normalize_date("5 października", now), at(2024, 10, 5, 0, 0));
        assert_eq!(normalize_date("12 Września 2023", now), at(2024, 9, 12, 0, 0));
        assert_eq!(normalize_date("1 stycznia", now), at(2024, 1, 1, 0, 0));
    }

    #[test]
    fn test_every_month_name_is_recognized() {
        let now = at(2024, 6, 1, 0, 0);
        for month in 1..=12 {
            let text = format!("28 {}", month_name(month));
            assert_eq!(normalize_date(&text, now), at(2024, month, 28, 0, 0), "{text}");
        }
    }

    #[test]
    fn test_unparseable_dates_are_sentinel() {
        let now = at(2024, 10, 17, 14, 30);
        for text in [
            "",
            "N/A",
            "października",
            "pięć października",
            "5 octobre",
            "31 lutego",
            "0 maja",
            "32 maja",
            "5",
        ] {
            assert!(is_sentinel(normalize_date(text, now)), "{text:?}");
        }
    }
}
