use crate::table::path::{parse_path, PathSegment};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Marker prefix on a column expression requesting spreadsheet-safe quoting
pub const QUOTE_MARKER: char = '=';

/// One configured output column - a parsed path expression plus its
/// force-quote flag. Column order in the containing slice determines
/// output column order; duplicates are allowed and not deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Wrap the cell as `="value"` to defeat spreadsheet auto-formatting
    pub force_quote: bool,

    /// The path expression with the marker stripped, e.g. "location.zip_code"
    pub path: String,

    /// Pre-tokenized segments of `path`
    pub segments: Vec<PathSegment>,
}

impl ColumnSpec {
    /// Parse a column expression like `contact_person.email` or
    /// `=location.zip_code` (leading `=` requests force-quoting).
    pub fn parse(spec: &str) -> Self {
        let (force_quote, path) = match spec.strip_prefix(QUOTE_MARKER) {
            Some(rest) => (true, rest),
            None => (false, spec),
        };

        ColumnSpec {
            force_quote,
            path: path.to_string(),
            segments: parse_path(path),
        }
    }

    /// The header label for this column: the path expression without the marker
    pub fn header(&self) -> &str {
        &self.path
    }
}

/// Parse an ordered list of column expressions
pub fn parse_columns<S: AsRef<str>>(specs: &[S]) -> Vec<ColumnSpec> {
    specs.iter().map(|s| ColumnSpec::parse(s.as_ref())).collect()
}

/// Configuration for the tabulation process
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Timezone matching timestamps are interpreted in
    pub source_tz: Tz,

    /// Timezone matching timestamps are re-rendered in
    pub target_tz: Tz,

    /// Apply timestamp conversion to the inner value of force-quoted cells.
    /// Off by default: the conversion then runs against the decorated
    /// `="..."` string, never matches, and quoted columns pass through
    /// unconverted.
    pub convert_quoted: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            source_tz: Tz::UTC,
            target_tz: Tz::Europe__Berlin,
            convert_quoted: false,
        }
    }
}
