use crate::scrapers::olx::CARD_SELECTOR;
use crate::scrapers::traits::PageFetcher;
use anyhow::{Context, Result};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fetches search pages through headless Chrome, for when cards are rendered client-side
pub struct BrowserFetcher {
    browser: Browser,
    timeout: Duration,
}

impl BrowserFetcher {
    /// Launch a headless Chrome instance shared by all fetches of this run
    pub fn new(timeout: Duration) -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;

        Ok(Self { browser, timeout })
    }

    fn render(browser: &Browser, url: &str, timeout: Duration) -> Result<String> {
        let tab = browser.new_tab().context("Failed to open browser tab")?;
        tab.set_default_timeout(timeout);

        then_cleanup(
            || Self::capture(&tab, url),
            || {
                if let Err(e) = tab.close(true) {
                    debug!(%url, error = %e, "Failed to close tab");
                }
            },
        )
    }

    fn capture(tab: &Tab, url: &str) -> Result<String> {
        tab.navigate_to(url)
            .with_context(|| format!("Failed to navigate to {url}"))?;
        tab.wait_until_navigated()
            .with_context(|| format!("Navigation to {url} did not finish"))?;

        // An empty result page never renders a card; still return its HTML
        if let Err(e) = tab.wait_for_element(CARD_SELECTOR) {
            warn!(%url, error = %e, "Listing cards did not appear before timeout");
        }

        let html = tab.get_content().context("Failed to read rendered HTML")?;
        debug!(%url, bytes = html.len(), "Captured rendered page");

        Ok(html)
    }
}

/// Run `body`, then `cleanup` whether or not `body` failed
fn then_cleanup<T>(body: impl FnOnce() -> Result<T>, cleanup: impl FnOnce()) -> Result<T> {
    let result = body();
    cleanup();
    result
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let browser = self.browser.clone();
        let url = url.to_string();
        let timeout = self.timeout;

        tokio::task::spawn_blocking(move || Self::render(&browser, &url, timeout))
            .await
            .context("Browser task panicked")?
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}
