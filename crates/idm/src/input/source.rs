//! Raw source records and metadata about the file they came from.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{CoordinateStatus, IndicatorSet};

/// One village as delivered by the data source, before scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceVillage {
    /// Stable identifier; assigned at load time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default)]
    pub kode: String,
    #[serde(default)]
    pub desa: String,
    #[serde(default)]
    pub kec: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Provenance as declared by the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate_status: Option<CoordinateStatus>,
    #[serde(default)]
    pub indikator: IndicatorSet,
}

impl SourceVillage {
    /// Create a source village with no coordinates and no ratings.
    pub fn new(kode: impl Into<String>, desa: impl Into<String>, kec: impl Into<String>) -> Self {
        Self {
            kode: kode.into(),
            desa: desa.into(),
            kec: kec.into(),
            ..Self::default()
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    /// Set surveyed coordinates.
    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    /// Set the declared coordinate provenance.
    pub fn with_coordinate_status(mut self, status: CoordinateStatus) -> Self {
        self.coordinate_status = Some(status);
        self
    }

    /// Set the raw ratings.
    pub fn with_indicators(mut self, indikator: IndicatorSet) -> Self {
        self.indikator = indikator;
        self
    }

    /// Both coordinates, when the source has them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }
}

/// Metadata about a loaded source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (json, csv, tsv, ...).
    pub format: String,
    /// Detected encoding.
    pub encoding: String,
    /// Number of source records read.
    pub record_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        record_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            encoding: "utf-8".to_string(),
            record_count,
            loaded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_source_json() {
        let json = r#"{
            "id": 7,
            "kode": "1807012001",
            "desa": "Purwosinoman",
            "kec": "Batanghari",
            "lat": -5.12,
            "lng": 105.41,
            "coordinateStatus": "ESTIMATED",
            "indikator": {"dld": [4, 5], "ds": [3.5]}
        }"#;
        let village: SourceVillage = serde_json::from_str(json).unwrap();

        assert_eq!(village.id, Some(7));
        assert_eq!(village.coordinate_status, Some(CoordinateStatus::Estimated));
        assert_eq!(village.indikator.dld, vec![4.0, 5.0]);
        assert_eq!(village.indikator.ds, vec![3.5]);
        assert!(village.indikator.dtkpd.is_empty());
        assert_eq!(village.coordinates(), Some((-5.12, 105.41)));
    }

    #[test]
    fn test_coordinates_require_both() {
        let mut village = SourceVillage::new("1", "A", "B");
        village.lat = Some(-5.0);
        assert_eq!(village.coordinates(), None);
    }

    #[test]
    fn test_metadata_file_name() {
        let meta = SourceMetadata::new(
            PathBuf::from("/data/desa.json"),
            "sha256:00".to_string(),
            10,
            "json".to_string(),
            2,
        );
        assert_eq!(meta.file, "desa.json");
        assert_eq!(meta.encoding, "utf-8");
    }
}
