//! Comma-delimited export of a record collection.
//!
//! Text columns are always quoted with internal quotes doubled; numeric
//! dimension columns are written bare. The score column is written as its
//! comma-decimal display string, so it is quoted too.

use std::borrow::Borrow;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::catalog::Dimension;
use crate::error::{IdmError, Result};
use crate::model::{parse_skor, DimensionScores, Status, VillageRecord};

/// MIME type of an exported file.
pub const EXPORT_MIME_TYPE: &str = "text/csv;charset=utf-8";

const FIXED_HEADERS: [&str; 6] = ["No", "Kecamatan", "Kode Desa", "Nama Desa", "Status", "Skor Total"];

/// Header line of an export.
pub fn header_line() -> String {
    FIXED_HEADERS
        .iter()
        .copied()
        .chain(Dimension::ALL.iter().map(|d| d.label()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a text field, doubling embedded quotes.
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Serialize records to delimited text, one header line plus one line per
/// record, joined with `\n`.
pub fn to_delimited_text<R>(records: &[R]) -> String
where
    R: Borrow<VillageRecord>,
{
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header_line());

    for (i, record) in records.iter().enumerate() {
        let record: &VillageRecord = record.borrow();
        let mut fields = vec![
            (i + 1).to_string(),
            quote_field(record.kec()),
            quote_field(record.kode()),
            quote_field(record.desa()),
            quote_field(record.status().code()),
            quote_field(&record.skor_text()),
        ];
        fields.extend(record.dimensi().values().iter().map(|v| v.to_string()));
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

/// A ready-to-save export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

/// Result of preparing an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExportOutcome {
    Ready(ExportFile),
    /// The collection is empty; the caller should tell the user instead of
    /// producing a file.
    NothingToExport,
}

/// File name of an export for `region` made on `date`.
pub fn export_file_name(region: &str, date: NaiveDate) -> String {
    format!("Data_Desa_{}_{}.csv", region, date.format("%Y-%m-%d"))
}

/// Build the export file for the current (filtered) collection.
pub fn prepare_export<R>(records: &[R], region: &str, date: NaiveDate) -> ExportOutcome
where
    R: Borrow<VillageRecord>,
{
    if records.is_empty() {
        debug!("export requested for an empty collection");
        return ExportOutcome::NothingToExport;
    }

    let file = ExportFile {
        file_name: export_file_name(region, date),
        mime_type: EXPORT_MIME_TYPE,
        contents: to_delimited_text(records),
    };
    debug!(file = %file.file_name, rows = records.len(), "prepared export");
    ExportOutcome::Ready(file)
}

/// One data line of an export, read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub no: usize,
    pub kec: String,
    pub kode: String,
    pub desa: String,
    pub status: Status,
    pub skor: f64,
    pub dimensi: DimensionScores,
}

/// Parse text produced by [`to_delimited_text`].
pub fn read_delimited_text(text: &str) -> Result<Vec<ExportRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .from_reader(text.as_bytes());

    let expected = FIXED_HEADERS.len() + Dimension::ALL.len();
    let width = reader.headers()?.len();
    if width != expected {
        return Err(IdmError::UnsupportedFormat(format!(
            "export has {} columns, expected {}",
            width, expected
        )));
    }

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |column: usize| record.get(column).unwrap_or_default();
        let number = |column: usize| -> Result<f64> {
            cell(column).trim().parse::<f64>().map_err(|e| IdmError::Parse {
                row: row_idx + 1,
                column: column + 1,
                message: e.to_string(),
            })
        };

        let no = cell(0).trim().parse::<usize>().map_err(|e| IdmError::Parse {
            row: row_idx + 1,
            column: 1,
            message: e.to_string(),
        })?;
        let status = cell(4).parse::<Status>()?;
        let skor = parse_skor(cell(5))?;

        let mut values = [0.0; 6];
        for (i, value) in values.iter_mut().enumerate() {
            *value = number(FIXED_HEADERS.len() + i)?;
        }
        let dimensi = DimensionScores {
            dld: values[0],
            ds: values[1],
            de: values[2],
            dl: values[3],
            da: values[4],
            dtkpd: values[5],
        };

        rows.push(ExportRow {
            no,
            kec: cell(1).to_string(),
            kode: cell(2).to_string(),
            desa: cell(3).to_string(),
            status,
            skor,
            dimensi,
        });
    }

    Ok(rows)
}
