//! Query engine over the canonical record collection.
//!
//! Every operation takes a slice and returns a new collection; the input is
//! never reordered or mutated.

mod aggregate;
mod filter;
mod query;
mod sort;

#[cfg(test)]
pub(crate) mod testing;

use std::borrow::Borrow;

use serde::Serialize;

use crate::model::VillageRecord;

pub use aggregate::{
    dimension_profile, region_summary, status_counts, DimensionProfile, RegionStats,
    StatusCounts, Summary,
};
pub use filter::{filter_by_search, filter_by_status};
pub use query::{Query, SortSpec};
pub use sort::{sort_by_field, SortDirection, SortField};

pub(crate) fn as_record<R: Borrow<VillageRecord>>(record: &R) -> &VillageRecord {
    record.borrow()
}

/// A record whose composite score is not a finite number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreAnomaly {
    pub id: u32,
    pub kode: String,
    pub value: f64,
}

/// Records with a non-finite composite score.
///
/// Each anomaly is logged once per call. Aggregations exclude these scores
/// from means and sorting orders them lowest.
pub fn score_anomalies<R>(records: &[R]) -> Vec<ScoreAnomaly>
where
    R: Borrow<VillageRecord>,
{
    records
        .iter()
        .map(as_record)
        .filter(|r| !r.skor().is_finite())
        .map(|r| {
            tracing::warn!(id = r.id(), kode = r.kode(), value = r.skor(), "non-finite composite score");
            ScoreAnomaly {
                id: r.id(),
                kode: r.kode().to_string(),
                value: r.skor(),
            }
        })
        .collect()
}
