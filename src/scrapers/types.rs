use clap::ValueEnum;
use std::time::Duration;

/// Which page retrieval strategy to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetcherKind {
    /// Plain HTTP GET; OLX renders result cards server-side
    Http,
    /// Headless Chrome; waits for the cards to render
    Browser,
}

/// Options controlling how sources are walked
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Upper bound for a single page retrieval
    pub timeout: Duration,
    /// How many sources may be in flight at once
    pub concurrency: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            concurrency: 1,
        }
    }
}
