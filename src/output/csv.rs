//! CSV report writer
//!
//! The report is semicolon-delimited with every field quoted, including
//! numeric-looking ones: downstream consumers treat all columns as literal
//! strings.

use crate::output::table::flatten;
use crate::record::ProductRecord;
use crate::Result;
use std::path::Path;

/// Flattens records and writes the CSV report to the given path
///
/// The first row is the header (global field union plus the trailing
/// `catalog` column), followed by one row per record in dump order. Writing
/// the same record set twice produces byte-identical output.
pub fn write_csv_report(path: &Path, records: &[ProductRecord]) -> Result<()> {
    let table = flatten(records)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::Always)
        .from_path(path)?;

    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn record(pairs: &[(&str, &str)]) -> ProductRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_records() -> Vec<ProductRecord> {
        vec![
            record(&[
                ("url", "https://x/p1"),
                ("title", "One"),
                ("price", "10.50"),
                ("breadcrumb", "A > B > C"),
            ]),
            record(&[("url", "https://x/p2"), ("title", "Two")]),
        ]
    }

    #[test]
    fn test_csv_is_semicolon_delimited_and_fully_quoted() {
        let file = NamedTempFile::new().unwrap();
        write_csv_report(file.path(), &sample_records()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            content,
            "\"url\";\"title\";\"price\";\"breadcrumb\";\"catalog\"\n\
             \"https://x/p1\";\"One\";\"10\";\"A > B > C\";\"C\"\n\
             \"https://x/p2\";\"Two\";\"\";\"\";\"\"\n"
        );
    }

    #[test]
    fn test_rewriting_same_records_is_byte_identical() {
        let file1 = NamedTempFile::new().unwrap();
        let file2 = NamedTempFile::new().unwrap();

        let records = sample_records();
        write_csv_report(file1.path(), &records).unwrap();
        write_csv_report(file2.path(), &records).unwrap();

        let bytes1 = std::fs::read(file1.path()).unwrap();
        let bytes2 = std::fs::read(file2.path()).unwrap();
        assert_eq!(bytes1, bytes2);
    }

    #[test]
    fn test_empty_record_set_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        assert!(write_csv_report(file.path(), &[]).is_err());
    }
}
