//! Bedesten: a review and listing harvester for Turkish dining and retail sites
//!
//! This crate scrapes paginated restaurant reviews through a remote rendering
//! API, accumulating records page by page with bounded retries, and runs a set
//! of one-shot retail catalog extractions. Results are written as one JSON
//! artifact per entity.

pub mod config;
pub mod fetch;
pub mod listings;
pub mod output;
pub mod review;

use thiserror::Error;

/// Main error type for Bedesten operations
#[derive(Debug, Error)]
pub enum BedestenError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),
}

/// Fetch-boundary errors
///
/// A value of this type is a returned failure, never a panic. The retry layer
/// turns repeated `Status`/`Transport` failures into `AttemptsExhausted`; the
/// pagination driver decides whether that kills a page or a whole entity.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Gave up on {url} after {attempts} attempts")]
    AttemptsExhausted { url: String, attempts: u32 },
}

/// Result type alias for Bedesten operations
pub type Result<T> = std::result::Result<T, BedestenError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use fetch::{FetchAdapter, Fetcher, RenderApi, RetryPolicy};
pub use review::{EntityOutcome, Extraction, LabelTable, Review};
