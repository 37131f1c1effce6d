use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let origin = Url::parse(&config.origin)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid origin: {}", e)))?;

    if origin.scheme() != "http" && origin.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "origin must use http or https, got '{}'",
            config.origin
        )));
    }

    if origin.host_str().is_none() {
        return Err(ConfigError::Validation(format!(
            "origin must have a host, got '{}'",
            config.origin
        )));
    }

    // Extracted hrefs are site-relative and get prefixed verbatim, so the
    // origin itself must not end with a slash.
    if config.origin.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "origin must not end with '/', got '{}'",
            config.origin
        )));
    }

    if !config.catalog_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "catalog-path must start with '/', got '{}'",
            config.catalog_path
        )));
    }

    if config.page_param.is_empty()
        || !config
            .page_param
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "page-param must be non-empty and contain only alphanumerics or '_', got '{}'",
            config.page_param
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.batch_size < 1 || config.batch_size > 100 {
        return Err(ConfigError::Validation(format!(
            "batch_size must be between 1 and 100, got {}",
            config.batch_size
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.dump_path.is_empty() {
        return Err(ConfigError::Validation(
            "dump_path cannot be empty".to_string(),
        ));
    }

    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
