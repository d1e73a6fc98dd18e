//! IDM: village development index aggregation engine.
//!
//! Loads per-village indicator ratings, scores and classifies every village,
//! and answers the filter, sort and rollup queries a regional dashboard needs.
//!
//! # Core Principles
//!
//! - **Load once**: integrity checks run when a dataset is loaded, never per query
//! - **Non-destructive**: queries return new views; the canonical collection is immutable
//! - **Configurable scoring**: composite formula and cut points come from configuration
//!
//! # Example
//!
//! ```no_run
//! use idm::{Query, SortDirection, SortField, Status, VillageIndex};
//!
//! let index = VillageIndex::new();
//! let dataset = index.load_file("desa.json").unwrap();
//!
//! let maju = Query::new()
//!     .with_status(Status::Maju)
//!     .sorted_by(SortField::Skor, SortDirection::Descending);
//! for village in dataset.query(&maju) {
//!     println!("{} {}", village.desa(), village.skor_text());
//! }
//!
//! let summary = dataset.summary();
//! println!("Mandiri: {}", summary.status.mandiri);
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod input;
pub mod model;
pub mod normalize;
pub mod rpjmd;
pub mod validation;

mod index;

pub use crate::index::{Dataset, VillageIndex};
pub use catalog::Dimension;
pub use config::IdmConfig;
pub use engine::{Query, SortDirection, SortField, Summary};
pub use error::{IdmError, Result};
pub use export::{prepare_export, to_delimited_text, ExportFile, ExportOutcome};
pub use input::{SourceMetadata, SourceVillage};
pub use model::{Status, StatusFilter, VillageRecord};
pub use normalize::{LoadOutcome, Normalizer};
pub use validation::{LoadIssue, Severity};
