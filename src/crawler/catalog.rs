//! Catalog traversal: section discovery, pagination, product URL collection
//!
//! All extraction runs against fixed markup locations of the target site:
//! section links live in the catalog overview table, pagination controls in a
//! `nums` block, product links in per-item title blocks. Extracted hrefs are
//! site-relative and are made absolute by prefixing the configured origin.

use crate::config::SiteConfig;
use crate::crawler::fetcher::fetch_page;
use crate::{Result, VitrinaError};
use futures::future::try_join_all;
use reqwest::Client;
use scraper::{Html, Selector};

/// Extracts the top-level catalog section URLs from the root listing page
///
/// Returns the sections in document order; duplicates are kept.
pub fn extract_catalog_urls(html: &str, origin: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut urls = Vec::new();

    if let Ok(selector) = Selector::parse("td.section_info ul li.name a") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                urls.push(format!("{}{}", origin, href));
            }
        }
    }

    urls
}

/// Extracts the product detail URLs from one catalog listing page
pub fn extract_product_urls(html: &str, origin: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut urls = Vec::new();

    if let Ok(selector) = Selector::parse("div.item-title a") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                urls.push(format!("{}{}", origin, href));
            }
        }
    }

    urls
}

/// Reads the page count from a catalog page's pagination control
///
/// The count is the text of the last anchor in the `nums` block. A page with
/// no pagination control is a single-page catalog. Pagination text that is
/// not an integer is a fatal error for the catalog; there is no fallback.
pub fn extract_page_count(html: &str, url: &str) -> Result<u32> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse("div.nums a") {
        Ok(s) => s,
        Err(_) => return Ok(1),
    };

    let last = match document.select(&selector).last() {
        Some(element) => element,
        None => return Ok(1),
    };

    let text = last.text().collect::<String>();
    text.trim()
        .parse::<u32>()
        .map_err(|source| VitrinaError::PageCount {
            url: url.to_string(),
            text: text.trim().to_string(),
            source,
        })
}

/// Fetches the root catalog listing and returns all section URLs
pub async fn discover_catalogs(client: &Client, site: &SiteConfig) -> Result<Vec<String>> {
    let html = fetch_page(client, &site.catalog_url()).await?;
    Ok(extract_catalog_urls(&html, &site.origin))
}

/// Fetches a catalog's first page and resolves its page count
pub async fn resolve_page_count(client: &Client, catalog_url: &str) -> Result<u32> {
    let html = fetch_page(client, catalog_url).await?;
    extract_page_count(&html, catalog_url)
}

/// Collects every product URL of one catalog, across all its pages
///
/// All pages are fetched concurrently (one request per page, unbounded within
/// the catalog) and the per-page URL lists are concatenated in page order
/// regardless of completion order. One failing page fetch fails the whole
/// catalog's collection.
pub async fn collect_product_urls(
    client: &Client,
    site: &SiteConfig,
    catalog_url: &str,
) -> Result<Vec<String>> {
    let page_count = resolve_page_count(client, catalog_url).await?;
    tracing::debug!("Catalog {} has {} page(s)", catalog_url, page_count);

    let page_fetches = (1..=page_count).map(|page| {
        let page_url = format!("{}?{}={}", catalog_url, site.page_param, page);
        async move {
            let html = fetch_page(client, &page_url).await?;
            Ok::<Vec<String>, VitrinaError>(extract_product_urls(&html, &site.origin))
        }
    });

    let pages = try_join_all(page_fetches).await?;

    let mut urls = Vec::new();
    for page_urls in pages {
        urls.extend(page_urls);
    }
    Ok(urls)
}
