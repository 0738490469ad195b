//! Analysis dispatcher trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::request::AnalysisRequest;
use crate::result::AnalysisResult;

/// Sends one analysis request to the analysis service.
///
/// # Implementation Notes
///
/// Implementations must:
/// - issue exactly one outbound request per call, tagged with the request's
///   correlation id
/// - never retry; a failed attempt is returned to the caller as
///   [`TextLensError::Analysis`](crate::TextLensError::Analysis)
/// - leave history and selection alone; recording the result is the
///   caller's job
#[async_trait]
pub trait AnalysisDispatcher: Send + Sync {
    async fn dispatch(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;
}
