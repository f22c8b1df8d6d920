//! # Tabcast - JSON records to CSV tables
//!
//! A library for flattening nested JSON records into a CSV table according
//! to a fixed column mapping. Columns are path expressions (`a.b[1].c`)
//! resolved against each record; missing data renders as empty cells, never
//! as an error.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabcast::{write_table, ColumnSpec, TableConfig};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let records = vec![
//!     json!({"name": "Alice", "location": {"zip_code": "01067"}}),
//!     json!({"name": "Bob"}),
//! ];
//!
//! let columns = vec![
//!     ColumnSpec::parse("name"),
//!     ColumnSpec::parse("=location.zip_code"),
//! ];
//!
//! let mut out = Vec::new();
//! write_table(&records, &columns, &TableConfig::default(), &mut out)?;
//!
//! // header: name,location.zip_code
//! // Alice's zip is wrapped as ="01067"; Bob's missing zip becomes ="None"
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use serde_json::Value;
use std::io::Write;

pub mod table;

// Re-export commonly used types for convenience
pub use table::{
    format_cell, is_present, parse_columns, parse_path, resolve, resolve_path, ColumnSpec,
    PathSegment, TableConfig, TableWriter, QUOTE_MARKER,
};

/// Main entry point: write records as a CSV table with a header row
pub fn write_table<W: Write>(
    records: &[Value],
    columns: &[ColumnSpec],
    config: &TableConfig,
    out: W,
) -> Result<()> {
    let mut writer = TableWriter::new(out);

    writer.write_header(columns)?;
    for record in records {
        writer.write_row(record, columns, config)?;
    }

    writer.flush()
}
