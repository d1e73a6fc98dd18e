//! Stable sorting by a typed field selector.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Dimension;
use crate::error::IdmError;
use crate::model::VillageRecord;

use super::as_record;

/// Sortable record field.
///
/// Parses from and prints as the dotted field path used by table headers
/// (`skor`, `kec`, `dimensi.dld`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    Id,
    Kode,
    Desa,
    Kec,
    Skor,
    Status,
    Lat,
    Lng,
    Dimension(Dimension),
}

impl SortField {
    /// Dotted path of this field.
    pub fn path(&self) -> String {
        match self {
            SortField::Id => "id".to_string(),
            SortField::Kode => "kode".to_string(),
            SortField::Desa => "desa".to_string(),
            SortField::Kec => "kec".to_string(),
            SortField::Skor => "skor".to_string(),
            SortField::Status => "status".to_string(),
            SortField::Lat => "lat".to_string(),
            SortField::Lng => "lng".to_string(),
            SortField::Dimension(d) => format!("dimensi.{}", d.key()),
        }
    }

    /// Numeric value of the field, when the field is numeric.
    fn numeric(&self, record: &VillageRecord) -> Option<f64> {
        match self {
            SortField::Skor => Some(record.skor()),
            SortField::Lat => Some(record.lat()),
            SortField::Lng => Some(record.lng()),
            SortField::Dimension(d) => Some(record.dimensi().get(*d)),
            _ => None,
        }
    }

    /// Compare two records on this field, in ascending order.
    pub fn compare(&self, a: &VillageRecord, b: &VillageRecord) -> Ordering {
        match self {
            SortField::Id => a.id().cmp(&b.id()),
            SortField::Kode => a.kode().cmp(b.kode()),
            SortField::Desa => compare_text(a.desa(), b.desa()),
            SortField::Kec => compare_text(a.kec(), b.kec()),
            SortField::Status => a.status().cmp(&b.status()),
            numeric => {
                let key = |r: &VillageRecord| numeric.numeric(r).map(ordering_key).unwrap_or(f64::NEG_INFINITY);
                key(a).total_cmp(&key(b))
            }
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for SortField {
    type Err = IdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        if let Some(key) = path.strip_prefix("dimensi.") {
            return key
                .parse()
                .map(SortField::Dimension)
                .map_err(|_| IdmError::InvalidSortField(s.to_string()));
        }

        match path {
            "id" => Ok(SortField::Id),
            "kode" => Ok(SortField::Kode),
            "desa" => Ok(SortField::Desa),
            "kec" => Ok(SortField::Kec),
            "skor" => Ok(SortField::Skor),
            "status" => Ok(SortField::Status),
            "lat" => Ok(SortField::Lat),
            "lng" => Ok(SortField::Lng),
            _ => Err(IdmError::InvalidSortField(s.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = IdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(IdmError::InvalidSortField(s.to_string())),
        }
    }
}

/// Return a new, stably sorted ordering of `records`.
///
/// Records with equal keys keep their relative input order in both
/// directions. Non-finite numeric values order as the lowest possible value
/// and are logged.
pub fn sort_by_field<R>(records: &[R], field: SortField, direction: SortDirection) -> Vec<R>
where
    R: Borrow<VillageRecord> + Clone,
{
    for record in records.iter().map(as_record) {
        if let Some(value) = field.numeric(record).filter(|v| !v.is_finite()) {
            tracing::warn!(kode = record.kode(), field = %field, value, "non-finite sort key");
        }
    }

    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = field.compare(as_record(a), as_record(b));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

fn ordering_key(value: f64) -> f64 {
    if value.is_finite() { value } else { f64::NEG_INFINITY }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
