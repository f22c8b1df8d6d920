//! tabcast: flatten a JSON array of records into a CSV table
//!
//! Usage:
//!   # Built-in booking-export column set, CSV to stdout
//!   tabcast bookings.json
//!
//!   # Write to a file with a custom column list
//!   tabcast bookings.json bookings.csv --columns columns.txt
//!
//!   # Render timestamps in another timezone
//!   tabcast bookings.json --target-tz America/New_York

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use clap::Parser;
use serde_json::Value;
use std::fs::File;
use std::io::BufWriter;
use tabcast::{parse_columns, write_table, ColumnSpec, TableConfig};

/// Column set of the booking export this tool replaces
const DEFAULT_COLUMNS: &[&str] = &[
    "documentId",
    "contact_person.first_name",
    "contact_person.last_name",
    "=contact_person.phone_number",
    "contact_person.email",
    "location.street",
    "location.house_number",
    "=location.zip_code",
    "location.place",
    "present_location",
    "additional_notes",
    "children[0].name",
    "children[0].identification_trait",
    "children[0].speech",
    "children[1].name",
    "children[1].identification_trait",
    "children[1].speech",
    "children[2].name",
    "children[2].identification_trait",
    "children[2].speech",
    "children[3].name",
    "children[3].identification_trait",
    "children[3].speech",
    "children[4].name",
    "children[4].identification_trait",
    "children[4].speech",
    "children[5].name",
    "children[5].identification_trait",
    "children[5].speech",
    "children[6].name",
    "children[6].identification_trait",
    "children[6].speech",
    "children[7].name",
    "children[7].identification_trait",
    "children[7].speech",
    "children[8].name",
    "children[8].identification_trait",
    "children[8].speech",
    "children[9].name",
    "children[9].identification_trait",
    "children[9].speech",
    "children[10].name",
    "children[10].identification_trait",
    "children[10].speech",
    "children[11].name",
    "children[11].identification_trait",
    "children[11].speech",
    "children[12].name",
    "children[12].identification_trait",
    "children[12].speech",
    "children[13].name",
    "children[13].identification_trait",
    "children[13].speech",
    "children[14].name",
    "children[14].identification_trait",
    "children[14].speech",
    "children[15].name",
    "children[15].identification_trait",
    "children[15].speech",
];

#[derive(Parser, Debug)]
#[command(name = "tabcast")]
#[command(about = "Flatten JSON records into a CSV table", long_about = None)]
struct Args {
    /// Input file containing a JSON array of records
    input: String,

    /// Output CSV file (stdout if omitted)
    output: Option<String>,

    /// File with one column path expression per line; '#' starts a comment.
    /// A leading '=' on an expression force-quotes the cell.
    #[arg(long, short = 'c')]
    columns: Option<String>,

    /// Timezone matching timestamps are interpreted in (IANA name)
    #[arg(long, default_value = "UTC")]
    source_tz: String,

    /// Timezone matching timestamps are rendered in (IANA name)
    #[arg(long, default_value = "Europe/Berlin")]
    target_tz: String,

    /// Apply timestamp conversion inside force-quoted cells
    #[arg(long)]
    convert_quoted: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = TableConfig {
        source_tz: parse_timezone(&args.source_tz)?,
        target_tz: parse_timezone(&args.target_tz)?,
        convert_quoted: args.convert_quoted,
    };

    let columns = match &args.columns {
        Some(path) => load_columns(path)?,
        None => parse_columns(DEFAULT_COLUMNS),
    };

    let records = load_records(&args.input)?;

    if let Some(output) = &args.output {
        let file = File::create(output)
            .with_context(|| format!("Cannot create output file: {output}"))?;
        write_table(&records, &columns, &config, BufWriter::new(file))?;
        println!("Wrote {} rows to {}", records.len(), output);
    } else {
        let stdout = std::io::stdout();
        write_table(&records, &columns, &config, stdout.lock())?;
    }

    Ok(())
}

fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("Unknown timezone {name:?}: {e}"))
}

/// Read the whole input file and parse it as a JSON array of records.
/// SIMD parsing first for speed, serde_json as the fallback.
fn load_records(path: &str) -> Result<Vec<Value>> {
    let mut content = std::fs::read(path)
        .with_context(|| format!("Cannot open input file: {path}"))?;

    let parsed: Value = match simd_json::to_owned_value(&mut content) {
        Ok(owned) => {
            let json_str = simd_json::to_string(&owned)?;
            serde_json::from_str(&json_str).context("Failed to convert parsed JSON")?
        }
        Err(_) => {
            // simd-json mutates its buffer on failure, so reread for the
            // fallback parse and its error position
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot open input file: {path}"))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse JSON in {path}"))?
        }
    };

    match parsed {
        Value::Array(records) => Ok(records),
        _ => bail!("Input {path} must contain a JSON array of records"),
    }
}

/// Load column expressions from a file, one per line
fn load_columns(path: &str) -> Result<Vec<ColumnSpec>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open columns file: {path}"))?;

    let specs: Vec<ColumnSpec> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ColumnSpec::parse)
        .collect();

    if specs.is_empty() {
        bail!("Columns file {path} contains no column expressions");
    }

    Ok(specs)
}
