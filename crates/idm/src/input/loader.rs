//! Source file loader for JSON and delimited village data.
//!
//! Delimited files carry one village per row. Identity columns are `id`
//! (optional), `kode`, `desa`, `kec`, `lat`, `lng` and `coordinate_status`;
//! ratings sit in columns named `<dimension>_<n>` (`dld_1` … `dtkpd_5`).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::catalog::Dimension;
use crate::config::LoaderConfig;
use crate::error::{IdmError, Result};
use crate::model::CoordinateStatus;

use super::source::{SourceMetadata, SourceVillage};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

static INDICATOR_COLUMN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(dld|ds|de|dl|da|dtkpd)_(\d+)$").unwrap());

/// Reads raw village records from disk or memory.
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Read a file and return its villages and metadata.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(Vec<SourceVillage>, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| IdmError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| IdmError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (villages, format) = if is_json(path, &contents) {
            (self.parse_json(&contents)?, "json".to_string())
        } else {
            let delimiter = match self.config.delimiter {
                Some(d) => d,
                None => detect_delimiter(&contents)?,
            };
            let format = match delimiter {
                b'\t' => "tsv",
                b',' => "csv",
                b';' => "csv-semicolon",
                b'|' => "psv",
                _ => "delimited",
            };
            (self.parse_delimited(&contents, delimiter)?, format.to_string())
        };

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            villages.len(),
        );

        Ok((villages, metadata))
    }

    /// Parse a JSON array of villages.
    pub fn parse_json(&self, bytes: &[u8]) -> Result<Vec<SourceVillage>> {
        let mut villages: Vec<SourceVillage> = serde_json::from_slice(bytes)?;
        if let Some(max) = self.config.max_rows {
            villages.truncate(max);
        }
        if villages.is_empty() {
            return Err(IdmError::EmptyData("No village records found".to_string()));
        }
        Ok(villages)
    }

    /// Parse delimited text with a known delimiter.
    pub fn parse_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<Vec<SourceVillage>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(IdmError::EmptyData("No columns found".to_string()));
        }

        let layout = ColumnLayout::from_headers(&headers)?;

        let mut villages = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            let record = result?;
            let cells: Vec<&str> = record.iter().collect();
            villages.push(layout.read_row(row_idx + 1, &cells)?);
        }

        if villages.is_empty() {
            return Err(IdmError::EmptyData("No data rows found".to_string()));
        }

        Ok(villages)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Column positions resolved from a header row.
struct ColumnLayout {
    id: Option<usize>,
    kode: usize,
    desa: usize,
    kec: usize,
    lat: Option<usize>,
    lng: Option<usize>,
    coordinate_status: Option<usize>,
    /// Indicator columns per dimension, ordered by their number.
    indicators: Vec<(Dimension, Vec<usize>)>,
}

impl ColumnLayout {
    fn from_headers(headers: &[String]) -> Result<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };
        let require = |names: &[&str]| {
            find(names).ok_or_else(|| IdmError::Parse {
                row: 0,
                column: 0,
                message: format!("missing required column '{}'", names[0]),
            })
        };

        let mut numbered: BTreeMap<Dimension, BTreeMap<u32, usize>> = BTreeMap::new();
        for (column, header) in headers.iter().enumerate() {
            if let Some(caps) = INDICATOR_COLUMN.captures(header) {
                let dimension: Dimension = caps[1].parse()?;
                let number: u32 = caps[2].parse().map_err(|_| IdmError::Parse {
                    row: 0,
                    column,
                    message: format!("invalid indicator column '{}'", header),
                })?;
                numbered.entry(dimension).or_default().insert(number, column);
            }
        }

        let indicators = Dimension::ALL
            .into_iter()
            .map(|d| {
                let columns = numbered
                    .remove(&d)
                    .map(|by_number| by_number.into_values().collect())
                    .unwrap_or_default();
                (d, columns)
            })
            .collect();

        Ok(Self {
            id: find(&["id"]),
            kode: require(&["kode", "kode desa", "kode_desa"])?,
            desa: require(&["desa", "nama desa", "nama_desa"])?,
            kec: require(&["kec", "kecamatan"])?,
            lat: find(&["lat", "latitude"]),
            lng: find(&["lng", "lon", "longitude"]),
            coordinate_status: find(&["coordinate_status", "coordinatestatus"]),
            indicators,
        })
    }

    fn read_row(&self, row: usize, cells: &[&str]) -> Result<SourceVillage> {
        let cell = |column: usize| cells.get(column).map(|s| s.trim()).unwrap_or("");
        let optional = |column: Option<usize>| column.map(cell).filter(|v| !is_null_value(v));

        let mut village = SourceVillage::new(cell(self.kode), cell(self.desa), cell(self.kec));

        if let Some(raw) = optional(self.id) {
            let column = self.id.unwrap_or_default();
            village.id = Some(raw.parse().map_err(|_| IdmError::Parse {
                row,
                column,
                message: format!("invalid id '{}'", raw),
            })?);
        }
        if let Some(raw) = optional(self.lat) {
            village.lat = Some(parse_number(raw, row, self.lat.unwrap_or_default())?);
        }
        if let Some(raw) = optional(self.lng) {
            village.lng = Some(parse_number(raw, row, self.lng.unwrap_or_default())?);
        }
        if let Some(raw) = optional(self.coordinate_status) {
            village.coordinate_status = Some(match raw.to_ascii_uppercase().as_str() {
                "EXACT" => CoordinateStatus::Exact,
                "ESTIMATED" => CoordinateStatus::Estimated,
                _ => {
                    return Err(IdmError::Parse {
                        row,
                        column: self.coordinate_status.unwrap_or_default(),
                        message: format!("unknown coordinate status '{}'", raw),
                    });
                }
            });
        }

        // Blank rating cells are skipped, leaving a short sequence for the
        // normalizer to reject.
        for (dimension, columns) in &self.indicators {
            let values = village.indikator.get_mut(*dimension);
            for &column in columns {
                let raw = cell(column);
                if !is_null_value(raw) {
                    values.push(parse_number(raw, row, column)?);
                }
            }
        }

        Ok(village)
    }
}

/// Parse a number written with either a dot or a comma as decimal separator.
fn parse_number(raw: &str, row: usize, column: usize) -> Result<f64> {
    let normalized = if raw.contains('.') {
        raw.to_string()
    } else {
        raw.replace(',', ".")
    };
    normalized.parse::<f64>().map_err(|_| IdmError::Parse {
        row,
        column,
        message: format!("invalid number '{}'", raw),
    })
}

/// Check if a value represents a missing/null value.
pub fn is_null_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed == "."
        || trimmed == "-"
}

fn is_json(path: &Path, contents: &[u8]) -> bool {
    let by_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let first_byte = contents.iter().find(|b| !b.is_ascii_whitespace());
    by_extension || first_byte == Some(&b'[')
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(IdmError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Prefer delimiters that split every line into the same number of fields.
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
