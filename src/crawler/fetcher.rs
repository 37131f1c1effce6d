//! HTTP fetcher implementation
//!
//! One shared client issues plain GET requests against the configured site.
//! Response bodies are decoded leniently: bytes that do not decode under the
//! response's declared encoding come back as U+FFFD replacement characters
//! instead of failing the fetch. Status codes are not inspected; an error
//! page simply yields empty extractions downstream.

use crate::{Result, VitrinaError};
use reqwest::Client;

/// Builds the HTTP client used for the whole run
///
/// Transport compression is enabled; everything else (timeouts, redirects,
/// headers) stays at the library defaults.
pub fn build_http_client() -> Result<Client> {
    let client = Client::builder().gzip(true).brotli(true).build()?;
    Ok(client)
}

/// Fetches a URL and returns the response body as text
///
/// Decoding is lossy, so a fetched body is never a decode error. Transport
/// failures (DNS, connect, broken body stream) are reported with the URL
/// attached.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| VitrinaError::Http {
            url: url.to_string(),
            source,
        })?;

    let body = response
        .text()
        .await
        .map_err(|source| VitrinaError::Http {
            url: url.to_string(),
            source,
        })?;

    Ok(body)
}
