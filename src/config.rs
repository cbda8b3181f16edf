// src/config.rs

//! Configuration and data loading utilities.
//!
//! Convenience functions that turn a config file path into a validated
//! [`Config`], the loaded [`Catalog`] and the chat [`ResponseBook`].

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::services::{Catalog, CatalogSources, ResponseBook};

/// Load configuration from a TOML file and validate it.
///
/// A missing or unreadable file falls back to defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path);
    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid config {}: {e}", path.display())))?;
    Ok(config)
}

/// Load every collection named by the configuration.
pub async fn load_catalog(config: &Config) -> Result<Catalog> {
    let catalog = CatalogSources::from_config(config).load_all().await?;
    log::info!(
        "Catalog loaded: {} colleges, {} fields of study, {} exam categories, {} ebooks, {} scholarships",
        catalog.colleges.len(),
        catalog.fields.len(),
        catalog.exam_categories.len(),
        catalog.ebooks.len(),
        catalog.scholarships.len()
    );
    Ok(catalog)
}

/// Load the chat response book named by the configuration.
pub fn load_responses(config: &Config) -> Result<ResponseBook> {
    ResponseBook::load(config.data.path(&config.data.chat))
}

/// Load and validate config, catalog and chat responses together.
pub async fn load_all(config_path: &Path) -> Result<(Config, Catalog, ResponseBook)> {
    let config = load_config(config_path)?;
    let catalog = load_catalog(&config).await?;
    let responses = load_responses(&config)?;
    Ok((config, catalog, responses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.loading.delay_ms, 500);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[session]\nmin_password_length = 0\n").unwrap();

        assert!(matches!(load_config(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn test_data_dir_is_relative_to_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[data]\ndir = \"fixtures\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.data.dir, tmp.path().join("fixtures"));
    }
}
