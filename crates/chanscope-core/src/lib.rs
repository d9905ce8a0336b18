//! Shared data model, aggregation, and configuration for chanscope.

pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod posts;
pub mod window;

pub use aggregate::{aggregate, truncate_text, AuthorStats, PostBlurb, BLURB_MAX_CHARS};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use posts::{dedupe_by_id, AuthorId, AuthorProfile, Post};
pub use window::CollectionWindow;

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("invalid calendar month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("invalid collection window: start {start} is after end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}
