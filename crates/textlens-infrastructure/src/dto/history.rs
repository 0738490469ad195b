//! Analysis history DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Initial schema, newest-first list of records

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use textlens_core::{AnalysisResult, CorrelationId, FeatureDescriptor, HistoryRecord, InputMode};

/// Entity name registered with the migrator.
pub const ANALYSIS_HISTORY_ENTITY: &str = "analysis_history";

/// The persisted history list as a single domain value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisHistory {
    /// Records, newest first
    pub records: Vec<HistoryRecord>,
}

// ============================================================================
// HistoryRecord DTOs
// ============================================================================

/// Requested feature flags DTO V1.0.0
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FeatureFlagsV1_0_0 {
    #[serde(default)]
    pub summarize: bool,
    #[serde(default)]
    pub topics: bool,
    #[serde(default)]
    pub sentiment: bool,
    #[serde(default)]
    pub intents: bool,
}

/// History record DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecordV1_0_0 {
    /// Correlation id of the originating request
    pub correlation_id: String,
    /// Creation instant (RFC 3339)
    pub timestamp: String,
    /// "text" or "url"
    pub input_mode: InputMode,
    /// Analyzed text or URL
    pub input_value: String,
    /// Requested features
    #[serde(default)]
    pub features: FeatureFlagsV1_0_0,
    /// Service answer
    #[serde(default)]
    pub result: AnalysisResult,
}

impl From<&HistoryRecord> for HistoryRecordV1_0_0 {
    fn from(record: &HistoryRecord) -> Self {
        HistoryRecordV1_0_0 {
            correlation_id: record.correlation_id.as_str().to_string(),
            timestamp: record.timestamp.clone(),
            input_mode: record.input_mode,
            input_value: record.input_value.clone(),
            features: FeatureFlagsV1_0_0 {
                summarize: record.features.summarize,
                topics: record.features.topics,
                sentiment: record.features.sentiment,
                intents: record.features.intents,
            },
            result: record.result.clone(),
        }
    }
}

impl From<HistoryRecordV1_0_0> for HistoryRecord {
    fn from(dto: HistoryRecordV1_0_0) -> Self {
        HistoryRecord {
            correlation_id: CorrelationId::from(dto.correlation_id),
            timestamp: dto.timestamp,
            input_mode: dto.input_mode,
            input_value: dto.input_value,
            features: FeatureDescriptor {
                summarize: dto.features.summarize,
                topics: dto.features.topics,
                sentiment: dto.features.sentiment,
                intents: dto.features.intents,
            },
            result: dto.result,
        }
    }
}

// ============================================================================
// AnalysisHistory DTOs
// ============================================================================

/// Analysis history DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct AnalysisHistoryV1_0_0 {
    /// Records, newest first
    #[serde(default)]
    pub records: Vec<HistoryRecordV1_0_0>,
}

/// Convert AnalysisHistoryV1_0_0 DTO to domain model
impl IntoDomain<AnalysisHistory> for AnalysisHistoryV1_0_0 {
    fn into_domain(self) -> AnalysisHistory {
        AnalysisHistory {
            records: self.records.into_iter().map(Into::into).collect(),
        }
    }
}

/// Convert domain model to AnalysisHistoryV1_0_0 DTO (for version-migrate save support)
impl FromDomain<AnalysisHistory> for AnalysisHistoryV1_0_0 {
    fn from_domain(history: AnalysisHistory) -> Self {
        AnalysisHistoryV1_0_0 {
            records: history.records.iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for AnalysisHistory entities.
pub fn create_history_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("analysis_history" => [
        AnalysisHistoryV1_0_0,
        AnalysisHistory
    ], save = true)
    .expect("Failed to create analysis_history migrator")
}
