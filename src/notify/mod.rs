pub mod message;
pub mod telegram;

pub use message::{format_listing, NOTHING_NEW};
pub use telegram::TelegramNotifier;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Destination for listing notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Submit one message; `Ok` means the destination confirmed it
    async fn send(&self, text: &str) -> Result<()>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Writes messages to the log instead of sending them, for dry runs
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        info!("📨 [dry run]\n{}", text);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
