//! Pipeline orchestration - the full crawl-then-flatten sequence
//!
//! The pipeline is a fixed sequence of stages with no backtracking:
//!
//! 1. Discover all catalog section URLs from the root listing.
//! 2. Per catalog, in discovery order: resolve the page count and collect the
//!    product URLs of every page.
//! 3. Fetch product pages in fixed-size concurrent batches; each batch's
//!    successful extractions are appended to the dump only after the whole
//!    batch settles. Failed product fetches are dropped without retry.
//! 4. Reload the dump, flatten it, write the CSV report.
//!
//! The dump file has a single writer (this pipeline's sequential flow), so no
//! locking is needed around it.

use crate::config::Config;
use crate::crawler::catalog::{collect_product_urls, discover_catalogs};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::product::fetch_product;
use crate::output::write_csv_report;
use crate::record::{load_dump, DumpWriter};
use crate::Result;
use futures::future::join_all;
use reqwest::Client;
use std::path::Path;

/// Drives the full crawl pipeline for one configured site
pub struct Pipeline {
    config: Config,
    client: Client,
}

impl Pipeline {
    /// Creates a pipeline, building the shared HTTP client
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client()?;
        Ok(Self { config, client })
    }

    /// Runs the crawl: discovery, collection, batched extraction, flattening
    pub async fn run(&self) -> Result<()> {
        let product_urls = self.collect_all_product_urls().await?;
        self.extract_products(&product_urls).await?;
        flatten_dump(&self.config)?;
        Ok(())
    }

    /// Stages 1-2: catalog discovery and product URL collection
    ///
    /// Catalogs are processed sequentially in discovery order; within one
    /// catalog all listing pages are fetched concurrently. Product URLs are
    /// concatenated in catalog order, then page order, then in-page order,
    /// without deduplication.
    async fn collect_all_product_urls(&self) -> Result<Vec<String>> {
        let site = &self.config.site;

        let catalog_urls = discover_catalogs(&self.client, site).await?;
        tracing::info!("Discovered {} catalog sections", catalog_urls.len());

        let mut product_urls = Vec::new();
        for catalog_url in &catalog_urls {
            let urls = collect_product_urls(&self.client, site, catalog_url).await?;
            tracing::info!("Catalog {}: {} product URLs", catalog_url, urls.len());
            product_urls.extend(urls);
        }

        tracing::info!("Collected {} product URLs in total", product_urls.len());
        Ok(product_urls)
    }

    /// Stage 3: batched product extraction into the dump file
    async fn extract_products(&self, product_urls: &[String]) -> Result<()> {
        let batch_size = self.config.crawler.batch_size;
        let total_batches = product_urls.len().div_ceil(batch_size);

        let mut dump = DumpWriter::create(Path::new(&self.config.output.dump_path))?;

        for (index, batch) in product_urls.chunks(batch_size).enumerate() {
            let fetches = batch
                .iter()
                .map(|url| fetch_product(&self.client, &self.config.site.origin, url));

            // Results come back in submission order; the dump is written only
            // once the whole batch has settled.
            let results = join_all(fetches).await;

            let mut kept = 0;
            for record in results.into_iter().flatten() {
                dump.append(&record)?;
                kept += 1;
            }

            tracing::info!(
                "Batch {}/{}: {} of {} products extracted",
                index + 1,
                total_batches,
                kept,
                batch.len()
            );
        }

        let total = dump.count();
        dump.finish()?;
        tracing::info!(
            "Dump complete: {} records written to {}",
            total,
            self.config.output.dump_path
        );
        Ok(())
    }
}

/// Flattens an existing dump file into the CSV report
///
/// This is the re-runnable half of the pipeline: it reads the dump written by
/// a previous crawl and regenerates the CSV without touching the network.
pub fn flatten_dump(config: &Config) -> Result<()> {
    let records = load_dump(Path::new(&config.output.dump_path))?;
    tracing::info!(
        "Flattening {} records from {}",
        records.len(),
        config.output.dump_path
    );

    write_csv_report(Path::new(&config.output.csv_path), &records)?;
    tracing::info!("CSV report written to {}", config.output.csv_path);
    Ok(())
}
