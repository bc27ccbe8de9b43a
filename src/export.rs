//! Machine-readable table output.
//!
//! Besides the painted grid, a table can be written as comma- or
//! tab-separated records, or as plain tab-joined lines. All three strip
//! markup with the caller's `strip` (usually [`crate::markup::strip`]) and skip
//! separator rows. A spanning cell is followed by one empty
//! field per extra column it covers, so every field stays under its header.

use std::fmt;
use std::str::FromStr;

use crate::renderables::table::{Row, TableError};

/// How a table is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Bordered grid with wrapped, styled cells.
    #[default]
    Table,
    /// Comma-separated values.
    Csv,
    /// Tab-separated values, quoted where needed.
    Tsv,
    /// Tab-joined values without quoting.
    Plain,
}

impl TableFormat {
    /// Render rows in this format.
    ///
    /// Returns `None` for [`TableFormat::Table`], which is painted instead.
    pub fn export(
        self,
        headers: &[Row],
        rows: &[Row],
        strip: &dyn Fn(&str) -> String,
    ) -> Option<Result<String, TableError>> {
        match self {
            Self::Table => None,
            Self::Csv => Some(write_delimited(headers, rows, b',', strip)),
            Self::Tsv => Some(write_delimited(headers, rows, b'\t', strip)),
            Self::Plain => Some(Ok(write_plain(headers, rows, strip))),
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Plain => "plain",
        };
        f.write_str(name)
    }
}

/// Error for an unrecognized format name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatParseError(pub String);

impl fmt::Display for FormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown table format '{}' (expected table, csv, tsv or plain)",
            self.0
        )
    }
}

impl std::error::Error for FormatParseError {}

impl FromStr for TableFormat {
    type Err = FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "plain" => Ok(Self::Plain),
            _ => Err(FormatParseError(s.to_string())),
        }
    }
}

/// Stripped fields of each non-separator row.
fn records<'a>(
    headers: &'a [Row],
    rows: &'a [Row],
    strip: &'a dyn Fn(&str) -> String,
) -> impl Iterator<Item = Vec<String>> + 'a {
    headers.iter().chain(rows).filter_map(move |row| {
        let cells = row.cells()?;
        let mut fields = Vec::with_capacity(row.span());
        for cell in cells {
            fields.push(strip(cell.text()));
            fields.extend(std::iter::repeat_n(String::new(), cell.colspan().saturating_sub(1)));
        }
        Some(fields)
    })
}

/// Write rows as delimited records.
pub fn write_delimited(
    headers: &[Row],
    rows: &[Row],
    delimiter: u8,
    strip: &dyn Fn(&str) -> String,
) -> Result<String, TableError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(Vec::new());

    for record in records(headers, rows, strip) {
        wtr.write_record(&record)?;
    }

    let bytes = wtr.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

/// Write rows as tab-joined lines without quoting.
#[must_use]
pub fn write_plain(headers: &[Row], rows: &[Row], strip: &dyn Fn(&str) -> String) -> String {
    let mut out = String::new();
    for record in records(headers, rows, strip) {
        out.push_str(&record.join("\t"));
        out.push('\n');
    }
    out
}
