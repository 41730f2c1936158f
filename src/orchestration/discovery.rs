//! Entry discovery - lists the publish targets under the root directory
//!
//! Only the immediate children of the root are considered. Entries that
//! fail the configured filter are returned as skipped, with the reason.

use crate::core::config::{EntryFilter, PublisherConfig};
use crate::core::error::PublishError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Why an entry was not published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "detail")]
pub enum SkipReason {
    NotADirectory,
    Hidden,
    MissingManifest(String),
    NonUtf8Name,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADirectory => write!(f, "not a directory"),
            Self::Hidden => write!(f, "hidden entry"),
            Self::MissingManifest(name) => write!(f, "no {} found", name),
            Self::NonUtf8Name => write!(f, "name is not valid UTF-8"),
        }
    }
}

/// An entry excluded from publishing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub entry: String,
    pub reason: SkipReason,
}

/// Result of listing the root directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredEntries {
    /// Entry names to publish, in attempt order
    pub targets: Vec<String>,
    pub skipped: Vec<SkippedEntry>,
}

/// List and filter the immediate entries of `config.root`
///
/// Fails only when the root itself cannot be enumerated.
pub async fn discover_entries(config: &PublisherConfig) -> Result<DiscoveredEntries, PublishError> {
    let root = &config.root;
    let listing_failed = |e: std::io::Error| PublishError::ListingFailed {
        root: root.clone(),
        message: e.to_string(),
    };

    let mut dir = fs::read_dir(root).await.map_err(listing_failed)?;
    let mut discovered = DiscoveredEntries::default();

    while let Some(entry) = dir.next_entry().await.map_err(listing_failed)? {
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                discovered.skipped.push(SkippedEntry {
                    entry: raw.to_string_lossy().into_owned(),
                    reason: SkipReason::NonUtf8Name,
                });
                continue;
            }
        };

        match check_entry(config, &entry.path(), &name).await {
            None => discovered.targets.push(name),
            Some(reason) => {
                debug!(entry = %name, reason = %reason, "skipping entry");
                discovered.skipped.push(SkippedEntry {
                    entry: name,
                    reason,
                });
            }
        }
    }

    if config.sort_entries {
        discovered.targets.sort();
        discovered.skipped.sort_by(|a, b| a.entry.cmp(&b.entry));
    }

    Ok(discovered)
}

async fn check_entry(config: &PublisherConfig, path: &Path, name: &str) -> Option<SkipReason> {
    if !config.include_hidden && name.starts_with('.') {
        return Some(SkipReason::Hidden);
    }

    // metadata() follows symlinks, so a link to a package directory counts
    let is_dir = fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);

    if config.entry_filter == EntryFilter::Directories && !is_dir {
        return Some(SkipReason::NotADirectory);
    }

    if let Some(manifest) = &config.required_manifest {
        let present = is_dir && fs::try_exists(path.join(manifest)).await.unwrap_or(false);
        if !present {
            return Some(SkipReason::MissingManifest(manifest.clone()));
        }
    }

    None
}
