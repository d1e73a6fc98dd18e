//! Per-record integrity checks run once at load time.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{Dimension, RATING_MAX, RATING_MIN};
use crate::input::SourceVillage;

use super::issue::{IssueKind, LoadIssue};

/// Administrative codes are digit groups, optionally dot-separated
/// (`1807012001` or `18.07.01.2001`).
static KODE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)*$").unwrap());

/// Check one source record in isolation.
///
/// Uniqueness across records is checked by the normalizer's batch pass.
pub fn check_village(row: usize, village: &SourceVillage) -> Vec<LoadIssue> {
    let mut issues = Vec::new();
    let kode = village.kode.trim();

    if kode.is_empty() {
        issues.push(LoadIssue::new(
            IssueKind::MissingKode,
            row,
            kode,
            "village has no administrative code",
        ));
    } else if !KODE_PATTERN.is_match(kode) {
        issues.push(LoadIssue::new(
            IssueKind::KodeFormat,
            row,
            kode,
            format!("administrative code '{}' is not a dotted digit sequence", kode),
        ));
    }

    if village.desa.trim().is_empty() {
        issues.push(LoadIssue::new(IssueKind::MissingName, row, kode, "village name is empty"));
    }
    if village.kec.trim().is_empty() {
        issues.push(LoadIssue::new(IssueKind::MissingName, row, kode, "district name is empty"));
    }

    for (dimension, values) in village.indikator.iter() {
        issues.extend(check_ratings(row, kode, dimension, values));
    }

    if village.coordinates().is_none() {
        issues.push(LoadIssue::new(
            IssueKind::MissingCoordinates,
            row,
            kode,
            "no coordinates in source; using fallback centroid",
        ));
    }

    issues
}

fn check_ratings(row: usize, kode: &str, dimension: Dimension, values: &[f64]) -> Vec<LoadIssue> {
    let mut issues = Vec::new();

    if values.len() != dimension.expected_len() {
        issues.push(LoadIssue::new(
            IssueKind::IndicatorLength,
            row,
            kode,
            format!(
                "dimension {} has {} ratings, expected {}",
                dimension,
                values.len(),
                dimension.expected_len()
            ),
        ));
    }

    let non_finite = values.iter().filter(|v| !v.is_finite()).count();
    if non_finite > 0 {
        issues.push(LoadIssue::new(
            IssueKind::NonFiniteRating,
            row,
            kode,
            format!("dimension {} has {} non-finite ratings", dimension, non_finite),
        ));
    }

    let out_of_range = values
        .iter()
        .filter(|v| v.is_finite() && !(RATING_MIN as f64..=RATING_MAX as f64).contains(*v))
        .count();
    if out_of_range > 0 {
        issues.push(LoadIssue::new(
            IssueKind::RatingOutOfRange,
            row,
            kode,
            format!(
                "dimension {} has {} ratings outside {}-{}",
                dimension, out_of_range, RATING_MIN, RATING_MAX
            ),
        ));
    }

    issues
}
