//! History repository backed by a [`HistorySlot`].
//!
//! The slot holds one versioned JSON document produced by the history
//! migrator, so stored history survives schema changes.

use std::sync::Arc;

use version_migrate::Migrator;

use textlens_core::{HistoryRecord, HistoryRepository, Result, TextLensError};

use crate::dto::{ANALYSIS_HISTORY_ENTITY, AnalysisHistory, create_history_migrator};
use crate::slot::{FileHistorySlot, HistorySlot};

/// Stores the history list as a versioned JSON blob in a slot.
pub struct SlotHistoryRepository {
    slot: Arc<dyn HistorySlot>,
    migrator: Migrator,
}

impl SlotHistoryRepository {
    pub fn new(slot: Arc<dyn HistorySlot>) -> Self {
        Self {
            slot,
            migrator: create_history_migrator(),
        }
    }

    /// Convenience constructor for a file-backed repository.
    pub fn with_file(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(FileHistorySlot::new(path)))
    }

    /// Decodes a stored blob into records, newest first.
    pub fn decode(&self, blob: &str) -> Result<Vec<HistoryRecord>> {
        let json_value: serde_json::Value = serde_json::from_str(blob).map_err(|e| {
            TextLensError::persistence(format!("Failed to parse history JSON: {}", e))
        })?;

        let history: AnalysisHistory = self
            .migrator
            .load_flat_from(ANALYSIS_HISTORY_ENTITY, json_value)
            .map_err(|e| TextLensError::persistence(format!("Failed to migrate history: {}", e)))?;

        Ok(history.records)
    }

    /// Encodes records into the versioned blob format.
    pub fn encode(&self, records: &[HistoryRecord]) -> Result<String> {
        let history = AnalysisHistory {
            records: records.to_vec(),
        };
        self.migrator
            .save_domain_flat(ANALYSIS_HISTORY_ENTITY, history)
            .map_err(|e| TextLensError::persistence(format!("Failed to serialize history: {}", e)))
    }
}

impl HistoryRepository for SlotHistoryRepository {
    fn load(&self) -> Result<Option<Vec<HistoryRecord>>> {
        match self.slot.load()? {
            Some(blob) => self.decode(&blob).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, records: &[HistoryRecord]) -> Result<()> {
        let blob = self.encode(records)?;
        self.slot.save(&blob)
    }
}
