//! Regional medium-term development plan (RPJMD 2025-2029): missions,
//! quick-win programs and the program performance matrix.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IdmError, Result};

const EMBEDDED_JSON: &str = include_str!("../data/rpjmd.json");

/// One of the plan's missions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: u32,
    pub title: String,
}

/// Flagship program shown above the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickWin {
    pub title: String,
    /// Icon identifier of the presentation layer.
    pub icon: String,
    pub description: String,
}

/// Target and budget ceiling of a program for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearTarget {
    pub year: u16,
    pub target: f64,
    /// Budget ceiling in rupiah.
    pub pagu: u64,
}

/// A program row of the performance matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub mission_id: u32,
    /// Responsible agency.
    pub opd: String,
    pub program: String,
    pub indicator: String,
    /// Baseline as published; some baselines are not plain numbers.
    pub baseline_2024: String,
    pub quick_win: bool,
    pub targets: Vec<YearTarget>,
}

impl Program {
    /// Budget ceiling summed over all years.
    pub fn total_pagu(&self) -> u64 {
        self.targets.iter().map(|t| t.pagu).sum()
    }

    pub fn target_for(&self, year: u16) -> Option<&YearTarget> {
        self.targets.iter().find(|t| t.year == year)
    }
}

/// Mission selector of the program matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MissionFilter {
    #[default]
    All,
    Mission(u32),
}

impl MissionFilter {
    pub fn matches(&self, program: &Program) -> bool {
        match self {
            MissionFilter::All => true,
            MissionFilter::Mission(id) => program.mission_id == *id,
        }
    }
}

impl FromStr for MissionFilter {
    type Err = IdmError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(MissionFilter::All);
        }
        s.parse::<u32>()
            .map(MissionFilter::Mission)
            .map_err(|_| IdmError::Config(format!("unknown mission filter '{}'", s)))
    }
}

impl fmt::Display for MissionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissionFilter::All => f.write_str("ALL"),
            MissionFilter::Mission(id) => write!(f, "{}", id),
        }
    }
}

/// The whole plan dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpjmdCatalog {
    pub missions: Vec<Mission>,
    pub quick_wins: Vec<QuickWin>,
    pub programs: Vec<Program>,
}

impl RpjmdCatalog {
    /// The plan shipped with the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_JSON)
    }

    /// Parse a plan dataset and check that every program refers to a known
    /// mission.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: RpjmdCatalog = serde_json::from_str(json)?;
        if let Some(orphan) = catalog
            .programs
            .iter()
            .find(|p| catalog.mission(p.mission_id).is_none())
        {
            return Err(IdmError::Config(format!(
                "program {} refers to unknown mission {}",
                orphan.id, orphan.mission_id
            )));
        }
        Ok(catalog)
    }

    pub fn mission(&self, id: u32) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }

    /// Programs matching `filter`, in catalog order.
    pub fn programs_for(&self, filter: MissionFilter) -> Vec<&Program> {
        self.programs.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Budget ceiling of all matching programs over all years.
    pub fn total_pagu(&self, filter: MissionFilter) -> u64 {
        self.programs_for(filter).iter().map(|p| p.total_pagu()).sum()
    }
}

/// Format an amount in rupiah with dot thousands separators
/// (`1234567` becomes `"Rp 1.234.567"`).
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("Rp {}", grouped)
}
