//! Analysis history: records, the bounded store, and the active selection.

mod model;
mod repository;
mod selection;
mod store;

pub use model::HistoryRecord;
pub use repository::{HistoryRepository, NullHistoryRepository};
pub use selection::ActiveSelection;
pub use store::{DEFAULT_HISTORY_CAPACITY, HistoryStore};
