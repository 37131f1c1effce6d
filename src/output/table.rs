//! Record flattening: field union, padding, and derived columns
//!
//! CSV needs a fixed header before the first row can be written, so the whole
//! record set is buffered and scanned twice: one pass to compute the union of
//! all field names ever seen (in first-seen order), one pass to pad each
//! record to that union. This two-pass shape is inherent, not an artifact.

use crate::record::{ProductRecord, FIELD_BREADCRUMB, FIELD_CATALOG, FIELD_PRICE};
use crate::{Result, VitrinaError};
use indexmap::IndexSet;

/// A fully flattened record set, ready to be written as CSV
#[derive(Debug, Clone, PartialEq)]
pub struct FlatTable {
    /// Header row: the global field union plus the trailing `catalog` column
    pub header: Vec<String>,
    /// One row per record, each exactly `header.len()` columns
    pub rows: Vec<Vec<String>>,
}

/// Computes the union of field names across all records, first-seen order
pub fn field_union(records: &[ProductRecord]) -> Vec<String> {
    let mut union = IndexSet::new();
    for record in records {
        for name in record.keys() {
            if !union.contains(name) {
                union.insert(name.clone());
            }
        }
    }
    union.into_iter().collect()
}

/// Flattens records into a padded table with the derived `catalog` column
///
/// Every row is the field union padded with empty strings, with two
/// transforms applied:
/// - `price` is truncated at its first `.` (a display transform, not numeric
///   rounding). The union must contain `price` and a non-empty value must
///   contain a `.`; both are hard requirements, not recoverable conditions.
/// - `catalog` is appended as the last `" > "`-delimited segment of the row's
///   breadcrumb trail.
pub fn flatten(records: &[ProductRecord]) -> Result<FlatTable> {
    if records.is_empty() {
        return Err(VitrinaError::EmptyDump);
    }

    let union = field_union(records);

    let price_index = union
        .iter()
        .position(|name| name == FIELD_PRICE)
        .ok_or(VitrinaError::MissingPriceColumn)?;
    let breadcrumb_index = union.iter().position(|name| name == FIELD_BREADCRUMB);

    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let mut row: Vec<String> = union
            .iter()
            .map(|name| record.get(name).cloned().unwrap_or_default())
            .collect();

        row[price_index] = reformat_price(&row[price_index])?;

        let catalog = breadcrumb_index
            .map(|index| derive_catalog(&row[index]))
            .unwrap_or_default();
        row.push(catalog);

        rows.push(row);
    }

    let mut header = union;
    header.push(FIELD_CATALOG.to_string());

    Ok(FlatTable { header, rows })
}

/// Truncates a price at its first `.`
///
/// An empty value is a padded absence and passes through; a non-empty value
/// without a `.` separator is an error.
fn reformat_price(value: &str) -> Result<String> {
    if value.is_empty() {
        return Ok(String::new());
    }
    match value.split_once('.') {
        Some((prefix, _)) => Ok(prefix.to_string()),
        None => Err(VitrinaError::PriceFormat {
            value: value.to_string(),
        }),
    }
}

/// The last `" > "`-delimited segment of a breadcrumb trail
fn derive_catalog(breadcrumb: &str) -> String {
    breadcrumb.rsplit(" > ").next().unwrap_or("").to_string()
}
