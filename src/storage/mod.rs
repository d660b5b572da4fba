//! Storage Layer
//!
//! Locates the per-user configuration directory. Recognition results are
//! never persisted.

use anyhow::Result;
use std::path::PathBuf;

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "snaptext", "SnapText")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(proj_dirs.config_dir().to_path_buf())
}

/// Default location of `config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}
