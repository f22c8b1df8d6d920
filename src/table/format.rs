//! Cell formatting - presence check, force-quoting, timestamp normalization
//!
//! The per-cell pipeline after path resolution: decide whether the value
//! counts as present, optionally wrap it in the `="..."` spreadsheet quote,
//! and rewrite UTC timestamps into the target timezone.

use crate::table::types::TableConfig;
use chrono::{NaiveDateTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Textual form of the missing marker inside a force-quoted cell
const MISSING_TEXT: &str = "None";

static UTC_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,6}Z$").unwrap()
});

/// The single presence predicate: missing, null, the empty string, numeric
/// zero, and `false` all count as absent and render as an empty cell.
pub fn is_present(resolved: Option<&Value>) -> bool {
    match resolved {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(_) => true,
    }
}

/// Render a resolved scalar for CSV output. Arrays and objects fall back to
/// their compact JSON representation.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Produce the final string for one CSV cell.
///
/// Missing and null under force-quote keep the `="None"` rendering of the
/// original export script; every other absent value is an empty cell no
/// matter the quote flag. With `convert_quoted` off, timestamp conversion
/// runs against the decorated `="..."` string and therefore never fires for
/// quoted columns.
pub fn format_cell(resolved: Option<&Value>, force_quote: bool, config: &TableConfig) -> String {
    if !is_present(resolved) {
        if force_quote && matches!(resolved, None | Some(Value::Null)) {
            return format!("=\"{MISSING_TEXT}\"");
        }
        return String::new();
    }

    let Some(value) = resolved else {
        return String::new();
    };
    let rendered = render(value);

    if force_quote {
        if config.convert_quoted {
            let inner = normalize_timestamp(&rendered, config).unwrap_or(rendered);
            format!("=\"{inner}\"")
        } else {
            format!("=\"{rendered}\"")
        }
    } else {
        normalize_timestamp(&rendered, config).unwrap_or(rendered)
    }
}

/// Rewrite a `YYYY-MM-DDTHH:MM:SS.ffffffZ` timestamp from the source
/// timezone into `YYYY-MM-DD HH:MM:SS` civil time in the target timezone.
/// Anything that does not match the pattern exactly is left alone.
fn normalize_timestamp(text: &str, config: &TableConfig) -> Option<String> {
    if !UTC_TIMESTAMP.is_match(text) {
        return None;
    }

    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.fZ").ok()?;
    let stamped = config.source_tz.from_local_datetime(&naive).single()?;

    Some(
        stamped
            .with_timezone(&config.target_tz)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    )
}
