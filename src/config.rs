//! Run configuration, read from command-line flags or the environment.

use crate::scrapers::{FetchOptions, FetcherKind};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Searches watched when no sources are configured
pub const DEFAULT_SOURCES: [&str; 4] = [
    "https://www.olx.pl/nieruchomosci/mieszkania/sprzedaz/warszawa/?search%5Bfilter_float_price%3Ato%5D=450000&search%5Bfilter_float_price_per_m%3Ato%5D=13000&search[order]=created_at:desc",
    "https://www.olx.pl/nieruchomosci/mieszkania/sprzedaz/poznan/?search%5Bfilter_float_price%3Ato%5D=400000&search%5Bfilter_float_price_per_m%3Ato%5D=10000&search[order]=created_at:desc",
    "https://www.olx.pl/nieruchomosci/mieszkania/sprzedaz/krakow/?search%5Bfilter_float_price%3Ato%5D=400000&search%5Bfilter_float_price_per_m%3Ato%5D=12000&search[order]=created_at:desc",
    "https://www.olx.pl/nieruchomosci/mieszkania/sprzedaz/wroclaw/?search%5Bfilter_float_price%3Ato%5D=400000&search%5Bfilter_float_price_per_m%3Ato%5D=11000&search[order]=created_at:desc",
];

/// Watches OLX property searches and posts new listings to Telegram
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Config {
    /// Telegram bot token
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// Telegram chat receiving the notifications
    #[arg(long, env = "CHAT_ID")]
    pub chat_id: String,

    /// Search-results URL to watch; repeat or comma-separate for several
    #[arg(long = "source", env = "SOURCE_URLS", value_delimiter = ',')]
    pub sources: Vec<String>,

    /// File holding links that were already delivered
    #[arg(long, env = "SENT_LINKS_FILE", default_value = "sent_links.json")]
    pub store: PathBuf,

    /// Page retrieval strategy
    #[arg(long, env = "FETCHER", value_enum, default_value_t = FetcherKind::Http)]
    pub fetcher: FetcherKind,

    /// Site root used to resolve relative listing links
    #[arg(long, env = "BASE_URL", default_value = "https://www.olx.pl")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Number of sources fetched at once
    #[arg(long, env = "FETCH_CONCURRENCY", default_value_t = 1)]
    pub concurrency: usize,

    /// Telegram Bot API root
    #[arg(long, env = "TELEGRAM_API_URL", default_value = "https://api.telegram.org")]
    pub telegram_api_url: String,

    /// Log messages instead of sending them and leave the sent-links file alone
    #[arg(long, env = "DRY_RUN")]
    pub dry_run: bool,
}

impl Config {
    /// Configured sources, or the built-in searches when none were given
    pub fn sources(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .sources
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if configured.is_empty() {
            DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect()
        } else {
            configured
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: self.timeout(),
            concurrency: self.concurrency.max(1),
        }
    }
}
