//! Where the CLI keeps its database.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DB_ENV_VAR: &str = "OPENWITH_DB";
const APP_DIR: &str = "openwith";
const DB_FILE: &str = "openwith.db";

/// `--db` wins, then `OPENWITH_DB`, then the platform data directory.
pub fn resolve_db_path(flag: Option<PathBuf>, env: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag.or(env) {
        return Ok(path);
    }
    let data_dir = dirs::data_dir().context("no data directory on this platform")?;
    Ok(data_dir.join(APP_DIR).join(DB_FILE))
}

pub fn ensure_parent_dir(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}
