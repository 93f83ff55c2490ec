//! Persisted set of listing links that have already been delivered.
//!
//! The file is a plain JSON array of strings. It is loaded once per run and
//! rewritten as a full snapshot; a missing or damaged file counts as empty.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

pub struct DedupStore {
    path: PathBuf,
    links: HashSet<String>,
}

impl DedupStore {
    /// Load the store from `path`, falling back to an empty set on any problem
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let links = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<String>>(&bytes) {
                Ok(links) => links.into_iter().collect(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Sent-links file is corrupt; starting empty");
                    HashSet::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No sent-links file yet; starting empty");
                HashSet::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read sent-links file; starting empty");
                HashSet::new()
            }
        };

        debug!(path = %path.display(), count = links.len(), "Loaded sent links");
        Self { path, links }
    }

    pub fn contains(&self, link: &str) -> bool {
        self.links.contains(link)
    }

    /// Record a delivered link; returns false if it was already known
    pub fn add(&mut self, link: impl Into<String>) -> bool {
        self.links.insert(link.into())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically replace the file with the current set
    pub async fn save(&self) -> Result<()> {
        let mut links: Vec<&String> = self.links.iter().collect();
        links.sort();

        let json = serde_json::to_string_pretty(&links).context("Failed to serialize sent links")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let tmp = temp_path(&self.path);
        fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        info!(path = %self.path.display(), count = links.len(), "💾 Saved sent links");
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "sent_links.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
