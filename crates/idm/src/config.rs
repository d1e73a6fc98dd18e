//! Engine configuration: scoring constants, loader options, coordinate fallbacks.
//!
//! The composite formula and status cut points are calibration values, not
//! facts about the data, so they live here and can be replaced from a JSON
//! file without touching the engine.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{Dimension, RATING_MAX};
use crate::error::{IdmError, Result};
use crate::model::{round_to, DimensionScores, Status, StatusThresholds};

/// Composite score formula and classification thresholds.
///
/// `skor = round(scale * sum(weight[d] * dimensi[d]), decimals)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Per-dimension weights.
    pub weights: DimensionScores,
    /// Factor applied to the weighted sum.
    pub scale: f64,
    /// Decimals kept in the stored composite score.
    pub decimals: u32,
    /// Status cut points on the composite scale.
    pub thresholds: StatusThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        // Maps the highest attainable raw total (47 indicators at 5) to 100.
        let max_total: f64 = Dimension::ALL
            .iter()
            .map(|d| (d.expected_len() * RATING_MAX as usize) as f64)
            .sum();

        Self {
            weights: DimensionScores::from_fn(|_| 1.0),
            scale: 100.0 / max_total,
            decimals: 2,
            thresholds: StatusThresholds::default(),
        }
    }
}

impl ScoringConfig {
    /// Composite score of a set of dimension scores.
    pub fn composite(&self, dimensi: &DimensionScores) -> f64 {
        let weighted: f64 = Dimension::ALL
            .iter()
            .map(|&d| self.weights.get(d) * dimensi.get(d))
            .sum();
        round_to(self.scale * weighted, self.decimals)
    }

    pub fn classify(&self, skor: f64) -> Status {
        self.thresholds.classify(skor)
    }

    /// Reject constants that would make scores non-finite or tiers overlap.
    pub fn validate(&self) -> Result<()> {
        for dimension in Dimension::ALL {
            let weight = self.weights.get(dimension);
            if !weight.is_finite() || weight < 0.0 {
                return Err(IdmError::Config(format!(
                    "weight for {} must be a finite, non-negative number (got {})",
                    dimension, weight
                )));
            }
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(IdmError::Config(format!(
                "scale must be positive (got {})",
                self.scale
            )));
        }
        if self.decimals > 6 {
            return Err(IdmError::Config(format!(
                "at most 6 decimals are supported (got {})",
                self.decimals
            )));
        }
        self.thresholds.validate()
    }
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub lat: f64,
    pub lng: f64,
}

/// Coordinates used for villages whose source carries none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoFallback {
    /// Center of the whole region.
    pub region_centroid: Centroid,
    /// Centroids by district name, preferred over the region centroid.
    pub district_centroids: IndexMap<String, Centroid>,
}

impl Default for GeoFallback {
    fn default() -> Self {
        Self {
            region_centroid: Centroid {
                lat: -5.10,
                lng: 105.60,
            },
            district_centroids: IndexMap::new(),
        }
    }
}

impl GeoFallback {
    /// Fallback coordinates for a village in district `kec`.
    pub fn centroid_for(&self, kec: &str) -> Centroid {
        self.district_centroids
            .get(kec)
            .copied()
            .unwrap_or(self.region_centroid)
    }
}

/// Options for reading delimited source files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
            max_rows: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdmConfig {
    pub scoring: ScoringConfig,
    pub loader: LoaderConfig,
    pub geo: GeoFallback,
    /// Region label used in export file names.
    pub region: String,
}

impl Default for IdmConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            loader: LoaderConfig::default(),
            geo: GeoFallback::default(),
            region: "Lamtim".to_string(),
        }
    }
}

impl IdmConfig {
    /// Load and validate a configuration from a JSON file.
    ///
    /// Missing sections fall back to their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IdmError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: IdmConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        if self.region.trim().is_empty() {
            return Err(IdmError::Config("region must not be empty".to_string()));
        }
        Ok(())
    }
}
