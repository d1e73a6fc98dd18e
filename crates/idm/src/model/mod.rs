//! Canonical record types, score text convention and status classification.

mod score;
mod status;
mod village;

pub use score::{format_skor, parse_skor, round_to, DECIMAL_SEPARATOR};
pub use status::{classify, Status, StatusFilter, StatusThresholds};
pub use village::{CoordinateStatus, DimensionScores, IndicatorDetail, IndicatorSet, VillageRecord};
