//! Load-time integrity issues.

use serde::{Deserialize, Serialize};

/// Kind of integrity issue found in source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A dimension's raw sequence does not have the catalog length.
    IndicatorLength,
    /// A raw rating is NaN or infinite.
    NonFiniteRating,
    /// A raw rating lies outside the 1–5 scale.
    RatingOutOfRange,
    /// Village or district name is empty.
    MissingName,
    /// Administrative code is empty.
    MissingKode,
    /// Administrative code has an unexpected shape.
    KodeFormat,
    /// Identifier already used by an earlier record.
    DuplicateId,
    /// Administrative code already used by an earlier record.
    DuplicateKode,
    /// No identifier left to assign to a record without one.
    IdExhausted,
    /// Source carries no coordinates; a centroid is substituted.
    MissingCoordinates,
}

impl IssueKind {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::IndicatorLength => "Indicator Length",
            IssueKind::NonFiniteRating => "Non-finite Rating",
            IssueKind::RatingOutOfRange => "Rating Out of Range",
            IssueKind::MissingName => "Missing Name",
            IssueKind::MissingKode => "Missing Code",
            IssueKind::KodeFormat => "Code Format",
            IssueKind::DuplicateId => "Duplicate Id",
            IssueKind::DuplicateKode => "Duplicate Code",
            IssueKind::IdExhausted => "Id Exhausted",
            IssueKind::MissingCoordinates => "Missing Coordinates",
        }
    }

    /// Default severity of this kind of issue.
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::IndicatorLength
            | IssueKind::NonFiniteRating
            | IssueKind::MissingName
            | IssueKind::MissingKode
            | IssueKind::DuplicateId
            | IssueKind::DuplicateKode
            | IssueKind::IdExhausted => Severity::Error,
            IssueKind::RatingOutOfRange | IssueKind::KodeFormat => Severity::Warning,
            IssueKind::MissingCoordinates => Severity::Info,
        }
    }
}

/// Severity level of an issue.
///
/// Records with an `Error` issue are excluded from the canonical collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Kept, but should be reviewed.
    Warning,
    /// Record excluded.
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// An integrity issue attached to one source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    /// Zero-based position of the record in the source.
    pub row: usize,
    /// Administrative code of the offending record (may be empty).
    pub kode: String,
    pub description: String,
}

impl LoadIssue {
    /// Create an issue with the kind's default severity.
    pub fn new(
        kind: IssueKind,
        row: usize,
        kode: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            row,
            kode: kode.into(),
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Issue counts by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl IssueCounts {
    pub fn tally(issues: &[LoadIssue]) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Error => counts.error += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }
}
