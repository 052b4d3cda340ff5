//! Configuration file location.

use anyhow::Result;
use directories::ProjectDirs;
use std::path::PathBuf;

use subzone::ServiceConfig;

/// Default config file path for this platform.
pub fn default_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "subzone", "subzone")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(dirs.config_dir().join("config.toml"))
}

/// Resolve the config path and load it, falling back to defaults when the
/// file does not exist.
pub fn load(explicit: Option<PathBuf>) -> Result<(PathBuf, ServiceConfig)> {
    let path = match explicit {
        Some(path) => path,
        None => default_path()?,
    };
    let config = ServiceConfig::load(&path)?;
    Ok((path, config))
}
