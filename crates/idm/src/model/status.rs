//! Status tiers and the composite score classifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdmError;

/// Classification band of a village, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Developing.
    Berkembang,
    /// Advanced.
    Maju,
    /// Self-reliant.
    Mandiri,
}

impl Status {
    /// All tiers from highest to lowest, the order used in summaries.
    pub const ALL: [Status; 3] = [Status::Mandiri, Status::Maju, Status::Berkembang];

    /// Canonical uppercase code (`MANDIRI`, `MAJU`, `BERKEMBANG`).
    pub fn code(&self) -> &'static str {
        match self {
            Status::Mandiri => "MANDIRI",
            Status::Maju => "MAJU",
            Status::Berkembang => "BERKEMBANG",
        }
    }

    /// Title-case label for legends and charts.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Mandiri => "Mandiri",
            Status::Maju => "Maju",
            Status::Berkembang => "Berkembang",
        }
    }

    /// Marker and chart color.
    pub fn color(&self) -> &'static str {
        match self {
            Status::Mandiri => "#10B981",
            Status::Maju => "#0EA5E9",
            Status::Berkembang => "#F59E0B",
        }
    }

    /// Phrase describing the state of services and governance in this tier.
    pub fn narrative(&self) -> &'static str {
        match self {
            Status::Mandiri => "sangat optimal dan berkelanjutan",
            Status::Maju => "sudah baik namun perlu ditingkatkan",
            Status::Berkembang => "sedang berkembang menuju kemandirian",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Status {
    type Err = IdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MANDIRI" => Ok(Status::Mandiri),
            "MAJU" => Ok(Status::Maju),
            "BERKEMBANG" => Ok(Status::Berkembang),
            other => Err(IdmError::Config(format!("unknown status '{}'", other))),
        }
    }
}

/// Cut points on the composite score.
///
/// A score exactly at a cut point belongs to the higher tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusThresholds {
    /// Lowest score classified as MANDIRI.
    pub mandiri: f64,
    /// Lowest score classified as MAJU.
    pub maju: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            mandiri: 75.0,
            maju: 55.0,
        }
    }
}

impl StatusThresholds {
    /// Classify a composite score.
    ///
    /// Total over all inputs: scores below `maju` (and NaN) are BERKEMBANG,
    /// scores above any realistic maximum are MANDIRI.
    pub fn classify(&self, skor: f64) -> Status {
        if skor >= self.mandiri {
            Status::Mandiri
        } else if skor >= self.maju {
            Status::Maju
        } else {
            Status::Berkembang
        }
    }

    /// Check that the cut points form a proper partition.
    pub fn validate(&self) -> Result<(), IdmError> {
        if !self.mandiri.is_finite() || !self.maju.is_finite() {
            return Err(IdmError::Config("status thresholds must be finite".to_string()));
        }
        if self.mandiri <= self.maju {
            return Err(IdmError::Config(format!(
                "MANDIRI threshold ({}) must be above MAJU threshold ({})",
                self.mandiri, self.maju
            )));
        }
        Ok(())
    }
}

/// Classify with the default thresholds.
pub fn classify(skor: f64) -> Status {
    StatusThresholds::default().classify(skor)
}

/// Status selection used by list filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    /// No filtering.
    #[default]
    All,
    /// Only records in the given tier.
    Only(Status),
}

impl StatusFilter {
    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => *s == status,
        }
    }
}

impl From<Status> for StatusFilter {
    fn from(status: Status) -> Self {
        StatusFilter::Only(status)
    }
}

impl FromStr for StatusFilter {
    type Err = IdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("ALL") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(75.0), Status::Mandiri);
        assert_eq!(classify(74.99), Status::Maju);
        assert_eq!(classify(55.0), Status::Maju);
        assert_eq!(classify(54.99), Status::Berkembang);
    }

    #[test]
    fn test_classify_clamps_out_of_range() {
        assert_eq!(classify(-10.0), Status::Berkembang);
        assert_eq!(classify(1_000.0), Status::Mandiri);
        assert_eq!(classify(f64::NAN), Status::Berkembang);
        assert_eq!(classify(f64::INFINITY), Status::Mandiri);
    }

    #[test]
    fn test_status_ordering() {
        assert!(Status::Berkembang < Status::Maju);
        assert!(Status::Maju < Status::Mandiri);
    }

    #[test]
    fn test_thresholds_validate() {
        assert!(StatusThresholds::default().validate().is_ok());
        let inverted = StatusThresholds {
            mandiri: 50.0,
            maju: 60.0,
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("ALL".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "maju".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(Status::Maju)
        );
        assert!("unknown".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&Status::Berkembang).unwrap();
        assert_eq!(json, "\"BERKEMBANG\"");
    }
}
