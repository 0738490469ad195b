//! History record domain model.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::feature::FeatureDescriptor;
use crate::request::{AnalysisRequest, CorrelationId, InputMode};
use crate::result::AnalysisResult;

/// One persisted snapshot of a completed analysis.
///
/// Records are created exactly once, when a response arrives, and are never
/// modified afterwards. The [`HistoryStore`](super::HistoryStore) owns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Correlation id of the request that produced this record
    pub correlation_id: CorrelationId,
    /// Creation instant (RFC 3339, UTC)
    pub timestamp: String,
    /// Whether `input_value` is raw text or a URL
    pub input_mode: InputMode,
    /// The analyzed text or URL
    pub input_value: String,
    /// Features that were requested
    pub features: FeatureDescriptor,
    /// The service's answer
    pub result: AnalysisResult,
}

impl HistoryRecord {
    /// Builds the record for a completed request, stamped with the current time.
    pub fn from_response(request: &AnalysisRequest, result: AnalysisResult) -> Self {
        Self::with_timestamp(request, result, Utc::now())
    }

    /// Builds the record for a completed request with an explicit timestamp.
    pub fn with_timestamp(
        request: &AnalysisRequest,
        result: AnalysisResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            correlation_id: request.correlation_id().clone(),
            timestamp: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            input_mode: request.input_mode(),
            input_value: request.input_value().to_string(),
            features: *request.features(),
            result,
        }
    }

    /// Parsed creation instant, if the stored timestamp is well-formed.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// First `max_chars` characters of the input on a single line, for lists.
    pub fn preview(&self, max_chars: usize) -> String {
        let flattened = self.input_value.split_whitespace().collect::<Vec<_>>().join(" ");
        if flattened.chars().count() <= max_chars {
            return flattened;
        }
        let mut truncated: String = flattened.chars().take(max_chars).collect();
        truncated.push('…');
        truncated
    }
}
