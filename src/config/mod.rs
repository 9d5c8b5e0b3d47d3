//! Configuration module for goods-search
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load settings from an explicit path, or from the first default location
/// that exists, falling back to built-in defaults.
///
/// Environment overrides are applied last in every case, then the result
/// is validated.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = read(explicit)?;
    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

fn read(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        info!("Loading settings from: {}", path.display());
        return Settings::from_file(path);
    }

    if let Ok(path) = std::env::var("GOODS_SEARCH_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            return Settings::from_file(&path);
        }
    }

    for path in default_paths() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            return Settings::from_file(&path);
        }
    }

    info!("No settings file found, using defaults");
    Ok(Settings::default())
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/goods-search/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("goods-search/settings.yml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_explicit_missing_file_errors() {
        let result = load(Some(Path::new("/nonexistent/goods-search.yml")));
        assert!(result.is_err());
    }
}
