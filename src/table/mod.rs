//! JSON tabulation - flatten JSON records into CSV rows
//!
//! This module turns a sequence of JSON records into a flat CSV table
//! according to a fixed, ordered column mapping. Column expressions address
//! nested data with dotted/indexed paths; cells can be force-quoted for
//! spreadsheets and matching UTC timestamps are rewritten into a target
//! timezone.

pub mod types;
pub mod path;
pub mod format;
pub mod writer;

pub use types::{ColumnSpec, TableConfig, parse_columns, QUOTE_MARKER};
pub use path::{PathSegment, parse_path, resolve, resolve_path};
pub use format::{format_cell, is_present};
pub use writer::TableWriter;
