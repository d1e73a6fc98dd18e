//! Indicator catalog: dimension definitions and positional indicator names.
//!
//! Indicator names are stored as one flat list in dimension order
//! (DLD, DS, DE, DL, DA, DTKPD). A raw rating at position `i` within a
//! dimension maps to the name at `dimension.offset() + i`.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdmError;

/// Reference maximum used when drawing dimension progress bars.
pub const DIMENSION_BAR_MAX: f64 = 170.0;

/// Lowest and highest displayed rating for a single indicator.
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// Human-readable indicator names, in catalog order.
pub const INDICATOR_NAMES: [&str; 47] = [
    // DLD
    "Akses Pendidikan",
    "Partisipasi Sekolah",
    "Kualitas Sekolah",
    "Akses Kesehatan",
    "Posyandu",
    "Nakes Desa",
    "BPJS",
    "Air Bersih",
    "Sanitasi",
    "RTLH",
    "Listrik",
    "Internet",
    "Info Publik",
    // DS
    "Gotong Royong",
    "Ruang Publik",
    "Keamanan",
    "Konflik",
    "Ormas",
    "Olahraga",
    "Budaya",
    "Toleransi",
    // DE
    "Produksi",
    "Akses Pasar",
    "Toko/Warung",
    "BUMDes",
    "Kinerja BUMDes",
    "Kredit",
    "Logistik",
    "Jalan Desa",
    "Digital",
    "Produk Unggulan",
    "Pasar Desa",
    // DL
    "Air Sungai",
    "Sampah",
    "Pencemaran",
    "Bencana",
    "Tanggap Bencana",
    // DA
    "Angkutan",
    "Jalan Poros",
    "Jembatan",
    "Waktu Kec",
    "Waktu Kab",
    // DTKPD
    "Musyawarah",
    "Transparansi",
    "Kinerja",
    "Aset",
    "Regulasi",
];

/// One of the six thematic indicator groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Basic services (Dimensi Layanan Dasar).
    Dld,
    /// Social (Dimensi Sosial).
    Ds,
    /// Economic (Dimensi Ekonomi).
    De,
    /// Environment (Dimensi Lingkungan).
    Dl,
    /// Accessibility (Dimensi Aksesibilitas).
    Da,
    /// Governance (Dimensi Tata Kelola Pemerintahan Desa).
    Dtkpd,
}

impl Dimension {
    /// All dimensions in catalog order.
    pub const ALL: [Dimension; 6] = [
        Dimension::Dld,
        Dimension::Ds,
        Dimension::De,
        Dimension::Dl,
        Dimension::Da,
        Dimension::Dtkpd,
    ];

    /// Key used in source data and field paths (`dld`, `ds`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::Dld => "dld",
            Dimension::Ds => "ds",
            Dimension::De => "de",
            Dimension::Dl => "dl",
            Dimension::Da => "da",
            Dimension::Dtkpd => "dtkpd",
        }
    }

    /// Full display name.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Dld => "Layanan Dasar (DLD)",
            Dimension::Ds => "Sosial (DS)",
            Dimension::De => "Ekonomi (DE)",
            Dimension::Dl => "Lingkungan (DL)",
            Dimension::Da => "Aksesibilitas (DA)",
            Dimension::Dtkpd => "Tata Kelola (TK)",
        }
    }

    /// Compact label used on chart axes.
    pub fn short_label(&self) -> &'static str {
        match self {
            Dimension::Dld => "Layanan",
            Dimension::Ds => "Sosial",
            Dimension::De => "Ekonomi",
            Dimension::Dl => "Lingkungan",
            Dimension::Da => "Akses",
            Dimension::Dtkpd => "Tata Kelola",
        }
    }

    /// Abbreviation shown in badges and table headers.
    pub fn code(&self) -> &'static str {
        match self {
            Dimension::Dld => "DLD",
            Dimension::Ds => "DS",
            Dimension::De => "DE",
            Dimension::Dl => "DL",
            Dimension::Da => "DA",
            Dimension::Dtkpd => "TK",
        }
    }

    /// Number of raw indicators in this dimension.
    pub fn expected_len(&self) -> usize {
        match self {
            Dimension::Dld => 13,
            Dimension::Ds => 8,
            Dimension::De => 11,
            Dimension::Dl => 5,
            Dimension::Da => 5,
            Dimension::Dtkpd => 5,
        }
    }

    /// Position of this dimension's first indicator in [`INDICATOR_NAMES`].
    pub fn offset(&self) -> usize {
        Self::ALL
            .iter()
            .take_while(|d| *d != self)
            .map(|d| d.expected_len())
            .sum()
    }

    /// Width of a dimension progress bar, in percent.
    pub fn bar_percent(score: f64) -> f64 {
        (score / DIMENSION_BAR_MAX * 100.0).clamp(0.0, 100.0)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Dimension {
    type Err = IdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Dimension::ALL
            .into_iter()
            .find(|d| d.key() == key)
            .ok_or_else(|| IdmError::InvalidSortField(s.to_string()))
    }
}

/// Total number of raw indicators across all dimensions.
pub fn total_indicators() -> usize {
    Dimension::ALL.iter().map(|d| d.expected_len()).sum()
}

/// Name of the indicator at `index` within `dimension`.
///
/// Falls back to `"Indikator {n}"` (1-based global position) when the
/// position runs past the catalog.
pub fn name_of(dimension: Dimension, index: usize) -> Cow<'static, str> {
    let global = dimension.offset() + index;
    match INDICATOR_NAMES.get(global) {
        Some(name) => Cow::Borrowed(*name),
        None => Cow::Owned(format!("Indikator {}", global + 1)),
    }
}

/// Rating as displayed: rounded and clamped into `1..=5`.
pub fn display_rating(value: f64) -> u8 {
    if value.is_nan() {
        return RATING_MIN;
    }
    value.round().clamp(RATING_MIN as f64, RATING_MAX as f64) as u8
}

/// Qualitative band of a displayed rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    /// Rating of 4 or 5.
    High,
    /// Rating of 3.
    Medium,
    /// Rating of 1 or 2.
    Low,
}

impl RatingBand {
    pub fn of(rating: u8) -> Self {
        match rating {
            r if r >= 4 => RatingBand::High,
            3 => RatingBand::Medium,
            _ => RatingBand::Low,
        }
    }

    /// Bar color used by the indicator grid.
    pub fn color(&self) -> &'static str {
        match self {
            RatingBand::High => "#22C55E",
            RatingBand::Medium => "#3B82F6",
            RatingBand::Low => "#EAB308",
        }
    }
}
