//! Combined table query: status filter, search term, sort.

use serde::{Deserialize, Serialize};

use crate::model::{StatusFilter, VillageRecord};

use super::filter::matches_search;
use super::sort::{sort_by_field, SortDirection, SortField};

/// Sort selector of a [`Query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// View parameters of the village table.
///
/// The default query keeps every record in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    pub status: StatusFilter,
    pub search: String,
    pub sort: Option<SortSpec>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn sorted_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec { field, direction });
        self
    }

    /// Borrowed view of the matching records, in query order.
    pub fn apply<'a>(&self, records: &'a [VillageRecord]) -> Vec<&'a VillageRecord> {
        let needle = self.search.to_lowercase();
        let matching: Vec<&VillageRecord> = records
            .iter()
            .filter(|r| self.status.matches(r.status()) && matches_search(r, &needle))
            .collect();

        match self.sort {
            Some(SortSpec { field, direction }) => sort_by_field(&matching, field, direction),
            None => matching,
        }
    }
}
