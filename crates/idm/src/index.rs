//! Village index: configuration plus the current canonical dataset.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::IdmConfig;
use crate::engine::{Query, Summary};
use crate::error::{IdmError, Result};
use crate::export::{prepare_export, ExportOutcome};
use crate::input::{Loader, SourceMetadata, SourceVillage};
use crate::model::VillageRecord;
use crate::normalize::{LoadOutcome, Normalizer};
use crate::validation::LoadIssue;

/// One loaded generation of the canonical collection.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Arc<[VillageRecord]>,
    issues: Vec<LoadIssue>,
    source: Option<SourceMetadata>,
}

impl Dataset {
    fn from_outcome(outcome: LoadOutcome, source: Option<SourceMetadata>) -> Self {
        Self {
            records: outcome.records.into(),
            issues: outcome.issues,
            source,
        }
    }

    pub fn records(&self) -> &[VillageRecord] {
        &self.records
    }

    /// Issues found while loading this generation.
    pub fn issues(&self) -> &[LoadIssue] {
        &self.issues
    }

    /// Source file metadata, when loaded from a file.
    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(&self.records)
    }

    pub fn query(&self, query: &Query) -> Vec<&VillageRecord> {
        query.apply(&self.records)
    }
}

/// Holds configuration and the current dataset.
///
/// Loading builds a complete new [`Dataset`] and swaps it in under a write
/// lock, so readers observe either the previous or the new generation.
pub struct VillageIndex {
    config: IdmConfig,
    loader: Loader,
    normalizer: Normalizer,
    current: RwLock<Arc<Dataset>>,
}

impl VillageIndex {
    /// Create an empty index with default configuration.
    pub fn new() -> Self {
        Self::with_config(IdmConfig::default())
    }

    /// Create an empty index with custom configuration.
    pub fn with_config(config: IdmConfig) -> Self {
        let loader = Loader::with_config(config.loader.clone());
        let normalizer = Normalizer::from_config(&config);

        Self {
            config,
            loader,
            normalizer,
            current: RwLock::new(Arc::new(Dataset::default())),
        }
    }

    pub fn config(&self) -> &IdmConfig {
        &self.config
    }

    /// Load villages from a JSON or delimited file, replacing the dataset.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Arc<Dataset>> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading village file");

        let (raws, source) = self.loader.load_file(path)?;
        let outcome = self.normalizer.normalize_batch(&raws);
        Ok(self.replace(Dataset::from_outcome(outcome, Some(source))))
    }

    /// Load villages already in memory, replacing the dataset.
    pub fn load_sources(&self, raws: &[SourceVillage]) -> Arc<Dataset> {
        let outcome = self.normalizer.normalize_batch(raws);
        self.replace(Dataset::from_outcome(outcome, None))
    }

    /// Re-read the file the current dataset was loaded from.
    pub fn reload_file(&self) -> Result<Arc<Dataset>> {
        let path = self
            .snapshot()
            .source()
            .map(|s| s.path.clone())
            .ok_or_else(|| IdmError::Config("current dataset was not loaded from a file".to_string()))?;
        info!(path = %path.display(), "reloading village file");
        self.load_file(path)
    }

    /// Replace the dataset with a new in-memory source collection.
    pub fn reload_sources(&self, raws: &[SourceVillage]) -> Arc<Dataset> {
        info!(previous = self.snapshot().len(), incoming = raws.len(), "reloading villages");
        self.load_sources(raws)
    }

    /// The canonical record collection of the current generation.
    pub fn processed_data(&self) -> Arc<[VillageRecord]> {
        Arc::clone(&self.snapshot().records)
    }

    /// The whole current generation.
    pub fn snapshot(&self) -> Arc<Dataset> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Export the records matching `query` under the configured region name.
    pub fn export(&self, query: &Query, date: NaiveDate) -> ExportOutcome {
        let dataset = self.snapshot();
        prepare_export(&dataset.query(query), &self.config.region, date)
    }

    fn replace(&self, dataset: Dataset) -> Arc<Dataset> {
        let dataset = Arc::new(dataset);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&dataset);
        info!(records = dataset.len(), issues = dataset.issues.len(), "dataset replaced");
        dataset
    }
}

impl Default for VillageIndex {
    fn default() -> Self {
        Self::new()
    }
}
