//! Status and search filters.
//!
//! Both filters preserve input order and return a new collection. They are
//! generic over anything that borrows a [`VillageRecord`], so they work on
//! owned records as well as on `&VillageRecord` views of the canonical
//! collection.

use std::borrow::Borrow;

use crate::model::{StatusFilter, VillageRecord};

use super::as_record;

/// Records whose status matches `filter`; `StatusFilter::All` keeps everything.
pub fn filter_by_status<R>(records: &[R], filter: StatusFilter) -> Vec<R>
where
    R: Borrow<VillageRecord> + Clone,
{
    records
        .iter()
        .filter(|r| filter.matches(as_record(*r).status()))
        .cloned()
        .collect()
}

/// Records whose village or district name contains `term`, ignoring case.
///
/// The term is matched as given, whitespace included. An empty term keeps
/// everything.
pub fn filter_by_search<R>(records: &[R], term: &str) -> Vec<R>
where
    R: Borrow<VillageRecord> + Clone,
{
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| matches_search(as_record(*r), &needle))
        .cloned()
        .collect()
}

/// Case-insensitive match of an already lowercased needle.
pub(crate) fn matches_search(record: &VillageRecord, needle: &str) -> bool {
    needle.is_empty()
        || record.desa().to_lowercase().contains(needle)
        || record.kec().to_lowercase().contains(needle)
}
