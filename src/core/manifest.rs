//! Package manifest lookup
//!
//! Reads the `[package]` table of a wally-style `wally.toml` so reports can
//! show which package and version an entry publishes.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Default manifest file name for wally packages
pub const WALLY_MANIFEST: &str = "wally.toml";

/// Package identity taken from a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    package: PackageInfo,
}

/// Read `project_path/manifest_name`
///
/// Returns `Ok(None)` when the file does not exist.
pub async fn read_package_info(
    project_path: &Path,
    manifest_name: &str,
) -> anyhow::Result<Option<PackageInfo>> {
    let path = project_path.join(manifest_name);
    if !fs::try_exists(&path).await? {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).await?;
    let manifest: ManifestFile = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid manifest {}: {}", path.display(), e))?;

    Ok(Some(manifest.package))
}
