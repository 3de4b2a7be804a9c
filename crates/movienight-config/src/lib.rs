pub mod config;
pub mod paths;

pub use config::{
    BackendConfig, Config, LoggingConfig, SearchConfig, WatchlogConfig, BACKEND_URL_ENV,
    DEFAULT_BACKEND_URL, WATCHLOG_LIMIT_CHOICES,
};
pub use paths::{PathManager, container_base_path};
