//! Record normalizer: raw source villages to canonical scored records.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{GeoFallback, IdmConfig, ScoringConfig};
use crate::error::{IdmError, Result};
use crate::input::SourceVillage;
use crate::model::{CoordinateStatus, DimensionScores, VillageRecord};
use crate::validation::{check_village, IssueCounts, IssueKind, LoadIssue, Severity};

/// Records that survived validation plus every issue found on the way.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadOutcome {
    pub records: Vec<VillageRecord>,
    pub issues: Vec<LoadIssue>,
}

impl LoadOutcome {
    pub fn issue_counts(&self) -> IssueCounts {
        IssueCounts::tally(&self.issues)
    }

    /// Rows excluded because of error-level issues.
    pub fn excluded_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self
            .issues
            .iter()
            .filter(|i| i.is_error())
            .map(|i| i.row)
            .collect();
        rows.dedup();
        rows
    }
}

/// Turns source villages into canonical records.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    scoring: ScoringConfig,
    geo: GeoFallback,
}

impl Normalizer {
    /// Create a normalizer with default scoring constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with custom scoring and coordinate fallbacks.
    pub fn with_config(scoring: ScoringConfig, geo: GeoFallback) -> Self {
        Self { scoring, geo }
    }

    pub fn from_config(config: &IdmConfig) -> Self {
        Self::with_config(config.scoring.clone(), config.geo.clone())
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Integrity issues of a single record.
    pub fn check(&self, row: usize, raw: &SourceVillage) -> Vec<LoadIssue> {
        check_village(row, raw)
    }

    /// Normalize one record.
    ///
    /// Fails when the record has an error-level integrity issue.
    pub fn normalize(&self, id: u32, raw: &SourceVillage) -> Result<VillageRecord> {
        if let Some(issue) = self.check(0, raw).into_iter().find(LoadIssue::is_error) {
            return Err(IdmError::Integrity {
                kode: raw.kode.trim().to_string(),
                message: issue.description,
            });
        }
        Ok(self.build(id, raw))
    }

    /// Validate and normalize a whole source collection.
    ///
    /// Records with error-level issues are excluded. For duplicate ids or
    /// codes the first valid occurrence is kept. Missing ids are assigned
    /// after the highest id present in the source, in row order; a record
    /// left without one once `u32::MAX` is taken is reported and excluded.
    pub fn normalize_batch(&self, raws: &[SourceVillage]) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();
        let mut seen_ids = HashSet::new();
        let mut seen_kodes = HashSet::new();
        // `None` once the id space above the highest source id is used up.
        let mut next_id = raws
            .iter()
            .filter_map(|r| r.id)
            .max()
            .map_or(Some(1), |max| max.checked_add(1));

        for (row, raw) in raws.iter().enumerate() {
            let mut issues = self.check(row, raw);
            let kode = raw.kode.trim();

            let id = match raw.id {
                Some(id) => Some(id),
                None => {
                    let id = next_id;
                    next_id = id.and_then(|id| id.checked_add(1));
                    id
                }
            };

            match id {
                None => issues.push(LoadIssue::new(
                    IssueKind::IdExhausted,
                    row,
                    kode,
                    "no id left to assign after the highest id in the source",
                )),
                Some(id) if !issues.iter().any(LoadIssue::is_error) => {
                    if seen_ids.contains(&id) {
                        issues.push(LoadIssue::new(
                            IssueKind::DuplicateId,
                            row,
                            kode,
                            format!("id {} already used by an earlier record", id),
                        ));
                    }
                    if seen_kodes.contains(kode) {
                        issues.push(LoadIssue::new(
                            IssueKind::DuplicateKode,
                            row,
                            kode,
                            format!("code '{}' already used by an earlier record", kode),
                        ));
                    }
                }
                Some(_) => {}
            }

            for issue in &issues {
                match issue.severity {
                    Severity::Error | Severity::Warning => warn!(
                        row = issue.row,
                        kode = %issue.kode,
                        kind = issue.kind.label(),
                        "{}",
                        issue.description
                    ),
                    Severity::Info => debug!(row = issue.row, kode = %issue.kode, "{}", issue.description),
                }
            }

            let rejected = issues.iter().any(LoadIssue::is_error);
            outcome.issues.append(&mut issues);
            let Some(id) = id.filter(|_| !rejected) else {
                continue;
            };

            seen_ids.insert(id);
            seen_kodes.insert(kode.to_string());
            outcome.records.push(self.build(id, raw));
        }

        let counts = outcome.issue_counts();
        info!(
            loaded = outcome.records.len(),
            source = raws.len(),
            errors = counts.error,
            warnings = counts.warning,
            "normalized village records"
        );

        outcome
    }

    fn build(&self, id: u32, raw: &SourceVillage) -> VillageRecord {
        let dimensi = DimensionScores::from_fn(|d| raw.indikator.get(d).iter().sum());
        let skor = self.scoring.composite(&dimensi);
        let status = self.scoring.classify(skor);
        let kec = raw.kec.trim().to_string();

        let (lat, lng, coordinate_status) = match raw.coordinates() {
            Some((lat, lng)) => (lat, lng, raw.coordinate_status.unwrap_or_default()),
            None => {
                let centroid = self.geo.centroid_for(&kec);
                (centroid.lat, centroid.lng, CoordinateStatus::Estimated)
            }
        };

        VillageRecord {
            id,
            kode: raw.kode.trim().to_string(),
            desa: raw.desa.trim().to_string(),
            kec,
            lat,
            lng,
            coordinate_status,
            dimensi,
            indikator: raw.indikator.clone(),
            skor,
            status,
        }
    }
}
