//! Vitrina: a single-site catalog scraper with a CSV report
//!
//! This crate crawls one e-commerce site's catalog tree, extracts product
//! records from fixed HTML locations, checkpoints them into a JSON dump file,
//! and flattens the dump into a semicolon-delimited CSV table.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for Vitrina operations
#[derive(Debug, Error)]
pub enum VitrinaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Unparseable page count '{text}' on {url}: {source}")]
    PageCount {
        url: String,
        text: String,
        source: std::num::ParseIntError,
    },

    #[error("No record in the dump carries a 'price' field")]
    MissingPriceColumn,

    #[error("Price value '{value}' has no '.' separator")]
    PriceFormat { value: String },

    #[error("Dump contains no records, nothing to flatten")]
    EmptyDump,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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
}

/// Result type alias for Vitrina operations
pub type Result<T> = std::result::Result<T, VitrinaError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use record::ProductRecord;
