//! Active selection tracking.

use serde::{Deserialize, Serialize};

use crate::request::CorrelationId;

/// The history record currently shown in the result view, if any.
///
/// This type only holds the id. Presence checks against the store happen in
/// [`HistoryStore::select`](super::HistoryStore::select) so that checking and
/// setting are a single operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSelection {
    current: Option<CorrelationId>,
}

impl ActiveSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&CorrelationId> {
        self.current.as_ref()
    }

    pub fn is_selected(&self, id: &CorrelationId) -> bool {
        self.current.as_ref() == Some(id)
    }

    pub(crate) fn set(&mut self, id: CorrelationId) {
        self.current = Some(id);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Clears the selection if it points at `id`. Returns whether it did.
    pub fn clear_if(&mut self, id: &CorrelationId) -> bool {
        if self.is_selected(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
