//! Output module for the flattened CSV report
//!
//! This module handles:
//! - Computing the global field union across all records
//! - Padding records to the union and deriving the `catalog` column
//! - Writing the semicolon-delimited, fully quoted CSV file

mod csv;
mod table;

pub use self::csv::write_csv_report;
pub use table::{field_union, flatten, FlatTable};
