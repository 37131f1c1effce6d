//! Crawler module for catalog traversal and product extraction
//!
//! This module contains the crawling half of the system:
//! - HTTP fetching with lenient body decoding
//! - Catalog discovery and pagination resolution
//! - Concurrent per-catalog product URL collection
//! - Product page extraction
//! - Batched pipeline orchestration

mod catalog;
mod fetcher;
mod pipeline;
mod product;

pub use catalog::{
    collect_product_urls, discover_catalogs, extract_catalog_urls, extract_page_count,
    extract_product_urls, resolve_page_count,
};
pub use fetcher::{build_http_client, fetch_page};
pub use pipeline::{flatten_dump, Pipeline};
pub use product::{fetch_product, parse_product};

use crate::config::Config;
use crate::Result;

/// Runs the complete crawl-then-flatten pipeline
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(())` - Crawl completed and the CSV report was written
/// * `Err(VitrinaError)` - Crawl failed
pub async fn crawl(config: Config) -> Result<()> {
    let pipeline = Pipeline::new(config)?;
    pipeline.run().await
}
