//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the assets directory and the settings file's parent exist.
pub async fn ensure_env(assets_dir: &str, settings_path: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(assets_dir).await.is_err() {
        info!(%assets_dir, "assets directory not found; creating it");
    }
    tokio::fs::create_dir_all(assets_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {assets_dir}: {e}"))?;

    match Path::new(settings_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
        }
        _ => warn!(%settings_path, "settings file has no parent directory; using working directory"),
    }
    Ok(())
}
