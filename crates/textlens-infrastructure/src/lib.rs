pub mod config;
pub mod dto;
pub mod paths;
pub mod slot;
pub mod slot_history_repository;

pub use crate::config::{HistoryConfig, ServiceConfig, TextLensConfig, load_config};
pub use crate::paths::{PathError, TextLensPaths};
pub use crate::slot::{FileHistorySlot, HistorySlot, MemoryHistorySlot};
pub use crate::slot_history_repository::SlotHistoryRepository;
