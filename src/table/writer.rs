use crate::table::format::format_cell;
use crate::table::path::resolve;
use crate::table::types::{ColumnSpec, TableConfig};
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;

/// Writes records as CSV rows against a fixed column set
pub struct TableWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TableWriter<W> {
    pub fn new(out: W) -> Self {
        TableWriter {
            writer: csv::Writer::from_writer(out),
        }
    }

    /// Write the header row: one label per column, marker stripped
    pub fn write_header(&mut self, columns: &[ColumnSpec]) -> Result<()> {
        let labels: Vec<&str> = columns.iter().map(|c| c.header()).collect();
        self.writer
            .write_record(&labels)
            .context("Failed to write header row")
    }

    /// Write one data row. Every configured column produces exactly one
    /// cell, whatever the shape of the record.
    pub fn write_row(
        &mut self,
        record: &Value,
        columns: &[ColumnSpec],
        config: &TableConfig,
    ) -> Result<()> {
        let cells: Vec<String> = columns
            .iter()
            .map(|col| format_cell(resolve(record, &col.segments), col.force_quote, config))
            .collect();

        self.writer
            .write_record(&cells)
            .context("Failed to write data row")
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush CSV output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::types::parse_columns;
    use serde_json::json;

    fn write_to_string(records: &[Value], specs: &[&str]) -> String {
        let columns = parse_columns(specs);
        let config = TableConfig::default();
        let mut buffer = Vec::new();
        {
            let mut writer = TableWriter::new(&mut buffer);
            writer.write_header(&columns).unwrap();
            for record in records {
                writer.write_row(record, &columns, &config).unwrap();
            }
            writer.flush().unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_strips_marker() {
        let output = write_to_string(&[], &["documentId", "=contact_person.phone_number"]);
        assert_eq!(
            output.lines().next().unwrap(),
            "documentId,contact_person.phone_number"
        );
    }

    #[test]
    fn test_row_length_matches_columns_for_any_shape() {
        let records = vec![
            json!({"a": 1, "b": {"c": "x"}}),
            json!({}),
            json!([1, 2, 3]),
            json!(null),
        ];
        let output = write_to_string(&records, &["a", "b.c", "missing.path"]);

        for line in output.lines() {
            assert_eq!(line.split(',').count(), 3, "bad row: {line:?}");
        }
        assert_eq!(output.lines().count(), 5);
    }

    #[test]
    fn test_quoted_cell_is_csv_escaped() {
        let records = vec![json!({"zip": "01067"})];
        let output = write_to_string(&records, &["=zip"]);
        let row = output.lines().nth(1).unwrap();
        // csv doubles the embedded quotes and wraps the field
        assert_eq!(row, "\"=\"\"01067\"\"\"");
    }

    #[test]
    fn test_duplicate_columns_kept() {
        let records = vec![json!({"a": "x"})];
        let output = write_to_string(&records, &["a", "a"]);
        assert_eq!(output.lines().next().unwrap(), "a,a");
        assert_eq!(output.lines().nth(1).unwrap(), "x,x");
    }

    #[test]
    fn test_missing_fields_render_empty_cells() {
        let records = vec![json!({"a": {"b": [1, 2]}})];
        let output = write_to_string(&records, &["a.b[0]", "a.b[5]", "nope"]);
        assert_eq!(output.lines().nth(1).unwrap(), "1,,");
    }
}
