//! Rollups over a record collection: status distribution, district ranking,
//! dimension profile.

use std::borrow::Borrow;

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{DimensionScores, Status, VillageRecord};

use super::{as_record, score_anomalies, ScoreAnomaly};

/// Mean composite score of one district.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStats {
    /// District name.
    pub kec: String,
    /// Mean of the finite composite scores in the district.
    pub mean: f64,
    /// Number of records in the district.
    pub count: usize,
}

/// Group records by district, ordered by descending mean score.
///
/// Districts with equal means keep the order in which they first appear.
pub fn region_summary<R>(records: &[R]) -> Vec<RegionStats>
where
    R: Borrow<VillageRecord>,
{
    // (sum of finite scores, finite count, record count)
    let mut groups: IndexMap<&str, (f64, usize, usize)> = IndexMap::new();
    for record in records.iter().map(as_record) {
        let entry = groups.entry(record.kec()).or_insert((0.0, 0, 0));
        if record.skor().is_finite() {
            entry.0 += record.skor();
            entry.1 += 1;
        }
        entry.2 += 1;
    }

    let mut regions: Vec<RegionStats> = groups
        .into_iter()
        .map(|(kec, (sum, scored, count))| RegionStats {
            kec: kec.to_string(),
            mean: if scored > 0 { sum / scored as f64 } else { 0.0 },
            count,
        })
        .collect();

    regions.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    regions
}

/// Number of records per status tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub mandiri: usize,
    pub maju: usize,
    pub berkembang: usize,
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Mandiri => self.mandiri,
            Status::Maju => self.maju,
            Status::Berkembang => self.berkembang,
        }
    }

    pub fn total(&self) -> usize {
        self.mandiri + self.maju + self.berkembang
    }

    /// Share of a tier in percent; zero for an empty collection.
    pub fn percent(&self, status: Status) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.get(status) as f64 * 100.0 / total as f64,
        }
    }
}

/// Count records per status tier.
pub fn status_counts<R>(records: &[R]) -> StatusCounts
where
    R: Borrow<VillageRecord>,
{
    let mut counts = StatusCounts::default();
    for record in records.iter().map(as_record) {
        match record.status() {
            Status::Mandiri => counts.mandiri += 1,
            Status::Maju => counts.maju += 1,
            Status::Berkembang => counts.berkembang += 1,
        }
    }
    counts
}

/// Mean score per dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DimensionProfile {
    pub means: DimensionScores,
    pub count: usize,
}

/// Mean of each dimension score across the collection; zeros when empty.
pub fn dimension_profile<R>(records: &[R]) -> DimensionProfile
where
    R: Borrow<VillageRecord>,
{
    let count = records.len();
    if count == 0 {
        return DimensionProfile::default();
    }

    let mut sums = [0.0; 6];
    for record in records.iter().map(as_record) {
        for (sum, value) in sums.iter_mut().zip(record.dimensi().values()) {
            *sum += value;
        }
    }

    // `values()` follows catalog order, which is declaration order.
    let means = DimensionScores::from_fn(|d| sums[d as usize] / count as f64);

    DimensionProfile { means, count }
}

/// All rollups consumed by the statistics view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub status: StatusCounts,
    pub regions: Vec<RegionStats>,
    pub dimensions: DimensionProfile,
    /// Records whose composite score is not a finite number.
    pub anomalies: Vec<ScoreAnomaly>,
}

impl Summary {
    pub fn compute<R>(records: &[R]) -> Self
    where
        R: Borrow<VillageRecord>,
    {
        Self {
            total: records.len(),
            status: status_counts(records),
            regions: region_summary(records),
            dimensions: dimension_profile(records),
            anomalies: score_anomalies(records),
        }
    }
}
