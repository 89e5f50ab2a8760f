//! Grid parsing from JSON and CSV exports.

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Grid, Row};

/// Encoding of a grid export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Pick by file extension, JSON otherwise
    #[default]
    Auto,
    /// Array of rows, or an object with a `values` array
    Json,
    /// Comma (or configured delimiter) separated, no header
    Csv,
    /// Tab separated, no header
    Tsv,
}

impl InputFormat {
    /// Replace `Auto` with a concrete format based on the input path.
    pub fn resolve(self, path: Option<&Path>) -> InputFormat {
        if self != InputFormat::Auto {
            return self;
        }
        let extension = path
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => InputFormat::Csv,
            Some("tsv") => InputFormat::Tsv,
            _ => InputFormat::Json,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputFormat::Auto => "auto",
            InputFormat::Json => "json",
            InputFormat::Csv => "csv",
            InputFormat::Tsv => "tsv",
        };
        write!(f, "{}", name)
    }
}

/// JSON shapes accepted as a grid.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonGrid {
    Rows(Vec<Vec<Value>>),
    /// Spreadsheet value range; a missing `values` field means no rows
    Range {
        #[serde(default)]
        values: Vec<Vec<Value>>,
    },
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parse grid text in the given (concrete or auto) format.
///
/// `source_name` only labels errors. `Auto` is treated as JSON here; resolve
/// it against the input path first to get extension-based detection.
#[instrument(level = "debug", skip(text), fields(bytes = text.len()))]
pub fn parse_grid(
    text: &str,
    format: InputFormat,
    csv_delimiter: char,
    source_name: &str,
) -> ApplicationResult<Grid> {
    let grid = match format {
        InputFormat::Auto | InputFormat::Json => parse_json(text, source_name)?,
        InputFormat::Csv => parse_delimited(text, csv_delimiter, format, source_name)?,
        InputFormat::Tsv => parse_delimited(text, '\t', format, source_name)?,
    };
    debug!("parsed {} rows", grid.len());
    Ok(grid)
}

fn parse_json(text: &str, source_name: &str) -> ApplicationResult<Grid> {
    let parsed: JsonGrid = serde_json::from_str(text).map_err(|e| ApplicationError::GridFormat {
        format: InputFormat::Json.to_string(),
        source_name: source_name.to_string(),
        message: e.to_string(),
    })?;
    let rows = match parsed {
        JsonGrid::Rows(rows) => rows,
        JsonGrid::Range { values } => values,
    };
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

fn parse_delimited(
    text: &str,
    delimiter: char,
    format: InputFormat,
    source_name: &str,
) -> ApplicationResult<Grid> {
    let format_error = |message: String| ApplicationError::GridFormat {
        format: format.to_string(),
        source_name: source_name.to_string(),
        message,
    };
    let delimiter = u8::try_from(delimiter)
        .map_err(|_| format_error(format!("delimiter {:?} is not a single byte", delimiter)))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut grid = Grid::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| format_error(e.to_string()))?;
        // The reader skips empty lines, but a blank first line still marks the root row
        if index == 0 && record.position().is_some_and(|pos| pos.line() > 1) {
            grid.push(Row::new());
        }
        let row: Row = record.iter().map(str::to_string).collect();
        grid.push(row);
    }
    Ok(grid)
}
