//! Fakes for the page retrieval and notification collaborators.

use crate::notify::Notifier;
use crate::scrapers::PageFetcher;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// Minimal OLX card linking to `href` with the given posting date
pub fn card(href: &str, date: &str) -> String {
    format!(
        r#"<div data-cy="l-card">
             <a href="{href}"><h6>Ogłoszenie {href}</h6></a>
             <p data-testid="ad-price">400 000 zł</p>
             <p data-testid="location-date">Warszawa - {date}</p>
           </div>"#
    )
}

#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
}

impl FakeFetcher {
    pub fn page(mut self, url: &str, cards: &[String]) -> Self {
        let html = format!("<html><body>{}</body></html>", cards.join("\n"));
        self.pages.insert(url.to_string(), html);
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(url) {
            anyhow::bail!("HTTP 503 Service Unavailable for {url}");
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("HTTP 404 Not Found for {url}"))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Records every message; fails those containing any of the configured fragments
#[derive(Default)]
pub struct FakeNotifier {
    fail_on: Vec<String>,
    sent: Mutex<Vec<String>>,
}

impl FakeNotifier {
    pub fn failing_on(fragment: &str) -> Self {
        Self {
            fail_on: vec![fragment.to_string()],
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(text.to_string());
        if self.fail_on.iter().any(|f| text.contains(f.as_str())) {
            anyhow::bail!("Telegram rejected message (429 Too Many Requests)");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
