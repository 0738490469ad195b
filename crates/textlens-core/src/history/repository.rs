//! History repository trait.

use crate::error::Result;
use crate::history::model::HistoryRecord;

/// Durable storage for the ordered history list.
///
/// Implementations persist the whole list on every save; the store never
/// asks for partial updates. Reads are treated as untrusted by the caller.
pub trait HistoryRepository: Send + Sync {
    /// Loads the persisted history, newest first.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(records))`: History was found and decoded
    /// - `Ok(None)`: Nothing has been persisted yet
    /// - `Err(_)`: Stored data exists but could not be read or decoded
    fn load(&self) -> Result<Option<Vec<HistoryRecord>>>;

    /// Replaces the persisted history with `records` (newest first).
    fn save(&self, records: &[HistoryRecord]) -> Result<()>;
}

/// Repository that persists nothing. Useful for ephemeral hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHistoryRepository;

impl HistoryRepository for NullHistoryRepository {
    fn load(&self) -> Result<Option<Vec<HistoryRecord>>> {
        Ok(None)
    }

    fn save(&self, _records: &[HistoryRecord]) -> Result<()> {
        Ok(())
    }
}
