//! Canonical village record and its per-dimension containers.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, Dimension, RatingBand};
use crate::model::score::format_skor;
use crate::model::status::Status;

/// Raw indicator ratings, one sequence per dimension in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    #[serde(default)]
    pub dld: Vec<f64>,
    #[serde(default)]
    pub ds: Vec<f64>,
    #[serde(default)]
    pub de: Vec<f64>,
    #[serde(default)]
    pub dl: Vec<f64>,
    #[serde(default)]
    pub da: Vec<f64>,
    #[serde(default)]
    pub dtkpd: Vec<f64>,
}

impl IndicatorSet {
    /// Ratings of one dimension.
    pub fn get(&self, dimension: Dimension) -> &[f64] {
        match dimension {
            Dimension::Dld => &self.dld,
            Dimension::Ds => &self.ds,
            Dimension::De => &self.de,
            Dimension::Dl => &self.dl,
            Dimension::Da => &self.da,
            Dimension::Dtkpd => &self.dtkpd,
        }
    }

    pub(crate) fn get_mut(&mut self, dimension: Dimension) -> &mut Vec<f64> {
        match dimension {
            Dimension::Dld => &mut self.dld,
            Dimension::Ds => &mut self.ds,
            Dimension::De => &mut self.de,
            Dimension::Dl => &mut self.dl,
            Dimension::Da => &mut self.da,
            Dimension::Dtkpd => &mut self.dtkpd,
        }
    }

    /// Iterate dimensions with their ratings, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &[f64])> {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

/// One numeric value per dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub dld: f64,
    pub ds: f64,
    pub de: f64,
    pub dl: f64,
    pub da: f64,
    pub dtkpd: f64,
}

impl DimensionScores {
    /// Build scores by evaluating `f` for each dimension.
    pub fn from_fn(mut f: impl FnMut(Dimension) -> f64) -> Self {
        Self {
            dld: f(Dimension::Dld),
            ds: f(Dimension::Ds),
            de: f(Dimension::De),
            dl: f(Dimension::Dl),
            da: f(Dimension::Da),
            dtkpd: f(Dimension::Dtkpd),
        }
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Dld => self.dld,
            Dimension::Ds => self.ds,
            Dimension::De => self.de,
            Dimension::Dl => self.dl,
            Dimension::Da => self.da,
            Dimension::Dtkpd => self.dtkpd,
        }
    }

    /// Values in catalog order.
    pub fn values(&self) -> [f64; 6] {
        Dimension::ALL.map(|d| self.get(d))
    }

    /// Unweighted sum over all dimensions.
    pub fn total(&self) -> f64 {
        self.values().iter().sum()
    }
}

/// Provenance of a record's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoordinateStatus {
    /// Surveyed point location.
    #[default]
    Exact,
    /// Centroid approximation.
    Estimated,
}

/// A single indicator prepared for drill-down display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorDetail {
    pub dimension: Dimension,
    pub name: Cow<'static, str>,
    pub raw: f64,
    pub rating: u8,
    pub band: RatingBand,
}

/// Canonical, scored village record.
///
/// Built only by the normalizer; read through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VillageRecord {
    pub(crate) id: u32,
    pub(crate) kode: String,
    pub(crate) desa: String,
    pub(crate) kec: String,
    pub(crate) lat: f64,
    pub(crate) lng: f64,
    pub(crate) coordinate_status: CoordinateStatus,
    pub(crate) dimensi: DimensionScores,
    pub(crate) indikator: IndicatorSet,
    pub(crate) skor: f64,
    pub(crate) status: Status,
}

impl VillageRecord {
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Administrative village code.
    pub fn kode(&self) -> &str {
        &self.kode
    }

    /// Village name.
    pub fn desa(&self) -> &str {
        &self.desa
    }

    /// District name.
    pub fn kec(&self) -> &str {
        &self.kec
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn coordinate_status(&self) -> CoordinateStatus {
        self.coordinate_status
    }

    pub fn is_estimated(&self) -> bool {
        self.coordinate_status == CoordinateStatus::Estimated
    }

    pub fn dimensi(&self) -> &DimensionScores {
        &self.dimensi
    }

    pub fn indikator(&self) -> &IndicatorSet {
        &self.indikator
    }

    /// Composite score.
    pub fn skor(&self) -> f64 {
        self.skor
    }

    /// Composite score in display form (`"85,11"`).
    pub fn skor_text(&self) -> String {
        format_skor(self.skor)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Every raw indicator with its catalog name and display rating.
    pub fn indicator_details(&self) -> Vec<IndicatorDetail> {
        self.indikator
            .iter()
            .flat_map(|(dimension, values)| {
                values.iter().enumerate().map(move |(i, &raw)| {
                    let rating = catalog::display_rating(raw);
                    IndicatorDetail {
                        dimension,
                        name: catalog::name_of(dimension, i),
                        raw,
                        rating,
                        band: RatingBand::of(rating),
                    }
                })
            })
            .collect()
    }
}
