//! Bounded, persisted analysis history.

use std::collections::HashSet;
use std::sync::Arc;

use crate::history::model::HistoryRecord;
use crate::history::repository::HistoryRepository;
use crate::history::selection::ActiveSelection;
use crate::request::CorrelationId;

/// Default number of records kept in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Ordered, capacity-bounded history of analyses plus the active selection.
///
/// Records are kept newest first. Every mutating operation persists the full
/// list through the [`HistoryRepository`] before returning, and keeps the
/// active selection pointing at a record that is still present.
///
/// # Persistence failures
///
/// Stored history is untrusted. If it cannot be read the store starts empty
/// and the next mutation overwrites the unreadable data. Failed saves are
/// logged; the in-memory state stays authoritative.
pub struct HistoryStore {
    records: Vec<HistoryRecord>,
    capacity: usize,
    selection: ActiveSelection,
    repository: Arc<dyn HistoryRepository>,
}

impl HistoryStore {
    /// Opens the store with [`DEFAULT_HISTORY_CAPACITY`].
    pub fn open(repository: Arc<dyn HistoryRepository>) -> Self {
        Self::open_with_capacity(repository, DEFAULT_HISTORY_CAPACITY)
    }

    /// Opens the store, loading whatever the repository holds.
    ///
    /// A capacity of zero is treated as one.
    pub fn open_with_capacity(repository: Arc<dyn HistoryRepository>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let records = match repository.load() {
            Ok(Some(records)) => sanitize(records, capacity),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable analysis history");
                Vec::new()
            }
        };
        tracing::debug!(count = records.len(), capacity, "Opened analysis history");

        Self {
            records,
            capacity,
            selection: ActiveSelection::new(),
            repository,
        }
    }

    // ============================================================================
    // Reads
    // ============================================================================

    /// All records, newest first.
    pub fn all(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn get(&self, id: &CorrelationId) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| &r.correlation_id == id)
    }

    pub fn contains(&self, id: &CorrelationId) -> bool {
        self.get(id).is_some()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Prepends `record`, evicting the oldest record when over capacity.
    ///
    /// If the evicted record is the active selection, the selection is
    /// cleared in the same call. Returns the evicted record, if any.
    pub fn insert(&mut self, record: HistoryRecord) -> Option<HistoryRecord> {
        if let Some(pos) = self
            .records
            .iter()
            .position(|r| r.correlation_id == record.correlation_id)
        {
            // Ids are minted per request; a repeat means the caller inserted twice.
            tracing::warn!(
                correlation_id = %record.correlation_id,
                "Replacing history record with duplicate correlation id"
            );
            self.records.remove(pos);
        }

        tracing::debug!(correlation_id = %record.correlation_id, "Inserting history record");
        self.records.insert(0, record);

        let evicted = if self.records.len() > self.capacity {
            self.records.pop()
        } else {
            None
        };
        if let Some(old) = &evicted
            && self.selection.clear_if(&old.correlation_id)
        {
            tracing::debug!(correlation_id = %old.correlation_id, "Evicted active record");
        }

        self.persist();
        evicted
    }

    /// Removes every record and clears the selection.
    pub fn clear(&mut self) {
        self.records.clear();
        self.selection.clear();
        self.persist();
        tracing::debug!("Cleared analysis history");
    }

    // ============================================================================
    // Active selection
    // ============================================================================

    /// Marks `id` as the displayed record.
    ///
    /// Unknown or stale ids are ignored and the current selection is left as
    /// it was. Returns whether the selection was set.
    pub fn select(&mut self, id: &CorrelationId) -> bool {
        if self.contains(id) {
            self.selection.set(id.clone());
            true
        } else {
            tracing::debug!(correlation_id = %id, "Ignoring selection of unknown record");
            false
        }
    }

    pub fn current(&self) -> Option<&CorrelationId> {
        self.selection.current()
    }

    /// The record behind the active selection.
    pub fn active_record(&self) -> Option<&HistoryRecord> {
        self.current().and_then(|id| self.get(id))
    }

    pub fn deselect(&mut self) {
        self.selection.clear();
    }

    fn persist(&self) {
        if let Err(e) = self.repository.save(&self.records) {
            tracing::warn!(error = %e, "Failed to persist analysis history");
        }
    }
}

/// Drops duplicate ids (first occurrence wins) and trims to capacity.
fn sanitize(records: Vec<HistoryRecord>, capacity: usize) -> Vec<HistoryRecord> {
    let loaded = records.len();
    let mut seen = HashSet::new();
    let mut kept: Vec<HistoryRecord> = records
        .into_iter()
        .filter(|r| seen.insert(r.correlation_id.clone()))
        .collect();
    kept.truncate(capacity);
    if kept.len() != loaded {
        tracing::warn!(
            loaded,
            kept = kept.len(),
            "Dropped duplicate or excess records from stored history"
        );
    }
    kept
}
