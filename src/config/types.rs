use serde::Deserialize;

/// Main configuration structure for Vitrina
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Site origin, scheme and host only (e.g. "https://shop.example.com")
    pub origin: String,

    /// Path of the root catalog listing page (e.g. "/catalog/")
    #[serde(rename = "catalog-path")]
    pub catalog_path: String,

    /// Query parameter carrying the listing page number
    #[serde(rename = "page-param", default = "default_page_param")]
    pub page_param: String,
}

fn default_page_param() -> String {
    "PAGEN_1".to_string()
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of product pages fetched concurrently per batch
    #[serde(rename = "batch-size")]
    pub batch_size: usize,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the intermediate JSON record dump
    #[serde(rename = "dump-path")]
    pub dump_path: String,

    /// Path to the final CSV report
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl SiteConfig {
    /// Absolute URL of the root catalog listing page
    pub fn catalog_url(&self) -> String {
        format!("{}{}", self.origin, self.catalog_path)
    }
}
