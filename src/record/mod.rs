//! Product records and the intermediate JSON dump
//!
//! A product record is an insertion-ordered map from field name to field
//! value. Attribute names read from product pages become fields of their own,
//! so the record must stay an open map rather than a fixed struct. Records are
//! checkpointed into a single JSON array on disk between the collection phase
//! and the flattening phase.

use crate::Result;
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// One extracted product: field name -> field value, in insertion order.
///
/// Always contains at least [`FIELD_URL`].
pub type ProductRecord = IndexMap<String, String>;

/// Field name for the product page URL (present in every record)
pub const FIELD_URL: &str = "url";
/// Field name for the main image URL
pub const FIELD_IMAGE: &str = "image";
/// Field name for the product title
pub const FIELD_TITLE: &str = "title";
/// Field name for the price (decimal-like string)
pub const FIELD_PRICE: &str = "price";
/// Field name for the SKU / article number
pub const FIELD_SKU: &str = "sku";
/// Field name for the plain-text description
pub const FIELD_DESCRIPTION: &str = "description";
/// Field name for the verbatim description markup
pub const FIELD_DESCRIPTION_HTML: &str = "description_html";
/// Field name for the arrow-joined breadcrumb trail
pub const FIELD_BREADCRUMB: &str = "breadcrumb";
/// Derived field name for the last breadcrumb segment (CSV only)
pub const FIELD_CATALOG: &str = "catalog";

/// Streaming writer for the intermediate record dump
///
/// Writes records one at a time as elements of a single JSON array, so the
/// dump on disk grows batch by batch and is valid JSON once [`finish`] runs.
/// The dump is written only by the orchestrator's sequential flow, strictly
/// between batch fan-outs.
///
/// [`finish`]: DumpWriter::finish
pub struct DumpWriter {
    writer: BufWriter<File>,
    count: usize,
}

impl DumpWriter {
    /// Creates (truncating) the dump file at the given path
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            count: 0,
        })
    }

    /// Appends one record to the dump
    pub fn append(&mut self, record: &ProductRecord) -> Result<()> {
        if self.count == 0 {
            self.writer.write_all(b"[\n")?;
        } else {
            self.writer.write_all(b",\n")?;
        }
        serde_json::to_writer(&mut self.writer, record)?;
        self.count += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Closes the JSON array and flushes the file
    pub fn finish(mut self) -> Result<()> {
        if self.count == 0 {
            self.writer.write_all(b"[]")?;
        } else {
            self.writer.write_all(b"\n]")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Reads all records back from a dump file, preserving field order
pub fn load_dump(path: &Path) -> Result<Vec<ProductRecord>> {
    let file = File::open(path)?;
    let records = serde_json::from_reader(BufReader::new(file))?;
    Ok(records)
}
