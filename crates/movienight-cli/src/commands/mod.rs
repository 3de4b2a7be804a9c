pub mod config;
pub mod home;
pub mod prompts;
pub mod render;
pub mod search;
pub mod status;
pub mod ui;
pub mod users;
pub mod watchlog;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use movienight_client::ApiClient;
use movienight_config::{Config, PathManager, WATCHLOG_LIMIT_CHOICES};
use movienight_core::{AppContext, Settings};
use std::sync::Arc;

/// Config file (or defaults) with the backend override applied, validated
pub fn load_config(paths: &PathManager, backend_url: Option<&str>) -> Result<Config> {
    let config_file = paths.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config.apply_backend_override(backend_url);
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;
    Ok(config)
}

pub fn connect(config: &Config) -> Result<AppContext> {
    let client = ApiClient::new(&config.backend.url).wrap_err("Failed to create HTTP client")?;
    tracing::debug!(backend = %config.backend.url, "Connected session");
    Ok(AppContext::new(Arc::new(client), Settings::from(config)))
}

/// Turn a 1-based position typed by the user into an index
pub fn index_from_position(position: usize, len: usize) -> Result<usize> {
    if position == 0 || position > len {
        return Err(eyre!("Position {} is out of range (1-{})", position, len));
    }
    Ok(position - 1)
}

/// `--limit` for the watch log: one of the offered page sizes
pub fn parse_page_size(raw: &str) -> std::result::Result<u32, String> {
    let limit: u32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if WATCHLOG_LIMIT_CHOICES.contains(&limit) {
        Ok(limit)
    } else {
        Err(format!("must be one of {:?}", WATCHLOG_LIMIT_CHOICES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_from_position() {
        assert_eq!(index_from_position(1, 3).unwrap(), 0);
        assert_eq!(index_from_position(3, 3).unwrap(), 2);
        assert!(index_from_position(0, 3).is_err());
        assert!(index_from_position(4, 3).is_err());
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("50"), Ok(50));
        assert!(parse_page_size("30").is_err());
        assert!(parse_page_size("ten").is_err());
    }

    #[test]
    fn test_load_config_applies_override() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::with_base(dir.path());
        let config = load_config(&paths, Some("http://example.test:9000/")).unwrap();
        assert_eq!(config.backend.url, "http://example.test:9000");
    }
}
