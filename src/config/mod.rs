//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, FeedConfig, LogFormat, LoggingConfig, SecurityConfig, ServerConfig, StorageSettings,
    DEFAULT_KEY_PEPPER,
};
