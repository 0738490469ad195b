//! Data Transfer Objects (DTOs) for persistence.
//!
//! DTOs carry an explicit schema version and are converted to and from
//! domain models through `version-migrate`, so older stored data can be
//! migrated forward when the schema changes.

pub mod history;

pub use history::{
    ANALYSIS_HISTORY_ENTITY, AnalysisHistory, AnalysisHistoryV1_0_0, HistoryRecordV1_0_0,
    create_history_migrator,
};
