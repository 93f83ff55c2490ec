mod config;
mod dates;
mod models;
mod notify;
mod pipeline;
mod scrapers;
mod store;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use config::Config;
use notify::{LogNotifier, Notifier, TelegramNotifier};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::parse();

    info!("🚀 OLX Scout - listing notifier");
    info!(
        sources = config.sources().len(),
        fetcher = ?config.fetcher,
        store = %config.store.display(),
        dry_run = config.dry_run,
        "Starting run"
    );

    let fetcher = scrapers::build_fetcher(config.fetcher, config.timeout())
        .context("Failed to set up page fetcher")?;

    let notifier: Box<dyn Notifier> = if config.dry_run {
        Box::new(LogNotifier)
    } else {
        Box::new(
            TelegramNotifier::new(
                &config.telegram_api_url,
                &config.bot_token,
                &config.chat_id,
                config.timeout(),
            )
            .context("Failed to set up Telegram notifier")?,
        )
    };

    let now = Local::now().naive_local();
    let summary = pipeline::run(&config, fetcher.as_ref(), notifier.as_ref(), now).await?;

    info!(
        scraped = summary.scraped,
        recent = summary.recent,
        new = summary.delivery.new_listings,
        delivered = summary.delivery.delivered,
        failed = summary.delivery.failed,
        saved = summary.delivery.store_saved,
        known = summary.known_links,
        "Run complete"
    );

    Ok(())
}
