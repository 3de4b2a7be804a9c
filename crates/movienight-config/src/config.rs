use movienight_models::SearchMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const BACKEND_URL_ENV: &str = "MOVIENIGHT_BACKEND_URL";

/// Page sizes offered by the watch history view
pub const WATCHLOG_LIMIT_CHOICES: [u32; 4] = [10, 25, 50, 100];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub watchlog: WatchlogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before typed input is sent as a query
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Queries shorter than this (in characters, after trimming) are not sent
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    #[serde(default)]
    pub default_mode: SearchMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlogConfig {
    #[serde(default = "default_watchlog_limit")]
    pub default_limit: u32,
    /// Number of events on the home screen
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_query_len() -> usize {
    2
}

fn default_watchlog_limit() -> u32 {
    25
}

fn default_recent_limit() -> u32 {
    5
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { url: default_backend_url() }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            default_mode: SearchMode::default(),
        }
    }
}

impl Default for WatchlogConfig {
    fn default() -> Self {
        Self {
            default_limit: default_watchlog_limit(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = self.backend.url.trim();
        if url.is_empty() {
            return Err(anyhow::anyhow!("backend.url cannot be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow::anyhow!("backend.url must start with http:// or https://: {}", url));
        }

        if self.search.debounce_ms == 0 {
            return Err(anyhow::anyhow!("search.debounce_ms must be greater than zero"));
        }

        if !WATCHLOG_LIMIT_CHOICES.contains(&self.watchlog.default_limit) {
            return Err(anyhow::anyhow!(
                "watchlog.default_limit must be one of {:?}, got {}",
                WATCHLOG_LIMIT_CHOICES,
                self.watchlog.default_limit
            ));
        }

        // The backend clamps limits to 1..=500
        for (name, limit) in [
            ("watchlog.default_limit", self.watchlog.default_limit),
            ("watchlog.recent_limit", self.watchlog.recent_limit),
        ] {
            if !(1..=500).contains(&limit) {
                return Err(anyhow::anyhow!("{} must be between 1 and 500, got {}", name, limit));
            }
        }

        Ok(())
    }

    /// Apply `--backend-url` and `MOVIENIGHT_BACKEND_URL` on top of the file value
    pub fn apply_backend_override(&mut self, cli_url: Option<&str>) {
        let env_url = std::env::var(BACKEND_URL_ENV).ok();
        self.backend.url = resolve_backend_url(cli_url, env_url.as_deref(), &self.backend.url);
    }
}

/// Precedence: command line, then environment, then config file.
/// Blank values are skipped and a trailing slash is dropped.
pub fn resolve_backend_url(cli: Option<&str>, env: Option<&str>, file: &str) -> String {
    let chosen = [cli, env, Some(file)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BACKEND_URL);
    chosen.trim_end_matches('/').to_string()
}
