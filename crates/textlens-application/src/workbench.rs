//! Analysis workbench.
//!
//! `AnalysisWorkbench` is the application state for one TextLens session:
//! the dispatcher, the bounded history with its active selection, and a
//! status indicator. Hosts call its command handlers instead of touching
//! the store directly.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use textlens_core::{
    AnalysisDispatcher, AnalysisRequest, CorrelationId, DEFAULT_LANGUAGE, FeatureDescriptor,
    HistoryRecord, HistoryStore, InputMode, RenderPlan, Result, TextLensError, present,
};

/// What the status indicator shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum WorkbenchStatus {
    Idle,
    /// A request is in flight
    Working,
    /// The last command failed with this message
    Failed(String),
}

/// A history record together with its render plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    pub record: HistoryRecord,
    pub plan: RenderPlan,
}

impl AnalysisView {
    fn of(record: &HistoryRecord) -> Self {
        Self {
            plan: present(&record.result, &record.features),
            record: record.clone(),
        }
    }
}

/// Resets the in-flight flag when dropped.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Application state and command handlers for analyses and their history.
///
/// # Thread Safety
///
/// The history store sits behind a `tokio::sync::Mutex` that is only held
/// for synchronous sections, never across the network call. At most one
/// analysis runs at a time; a second `analyze` is refused with
/// [`TextLensError::Busy`].
pub struct AnalysisWorkbench {
    dispatcher: Arc<dyn AnalysisDispatcher>,
    store: Mutex<HistoryStore>,
    status: RwLock<WorkbenchStatus>,
    in_flight: AtomicBool,
    language: String,
}

impl AnalysisWorkbench {
    pub fn new(dispatcher: Arc<dyn AnalysisDispatcher>, store: HistoryStore) -> Self {
        Self {
            dispatcher,
            store: Mutex::new(store),
            status: RwLock::new(WorkbenchStatus::Idle),
            in_flight: AtomicBool::new(false),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Sets the language hint sent with every request.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub async fn status(&self) -> WorkbenchStatus {
        self.status.read().await.clone()
    }

    /// True while an analysis request is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    // ============================================================================
    // Commands
    // ============================================================================

    /// Runs one analysis and makes its record the active one.
    ///
    /// Input is validated before anything is sent. On failure the history
    /// and the active selection are left untouched and the status shows the
    /// error message.
    pub async fn analyze(
        &self,
        mode: InputMode,
        input: &str,
        features: FeatureDescriptor,
    ) -> Result<AnalysisView> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(TextLensError::Busy)?;

        let request = match AnalysisRequest::new(mode, input, features, &self.language) {
            Ok(request) => request,
            Err(e) => {
                self.set_status(WorkbenchStatus::Failed(e.user_message())).await;
                return Err(e);
            }
        };

        self.set_status(WorkbenchStatus::Working).await;
        let result = match self.dispatcher.dispatch(&request).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    correlation_id = %request.correlation_id(),
                    error = %e,
                    "Analysis failed"
                );
                self.set_status(WorkbenchStatus::Failed(e.user_message())).await;
                return Err(e);
            }
        };

        let record = HistoryRecord::from_response(&request, result);
        let view = {
            let mut store = self.store.lock().await;
            let id = record.correlation_id.clone();
            if let Some(evicted) = store.insert(record) {
                tracing::debug!(evicted = %evicted.correlation_id, "Evicted oldest analysis");
            }
            store.select(&id);
            store.active_record().map(AnalysisView::of)
        };
        self.set_status(WorkbenchStatus::Idle).await;

        tracing::info!(
            correlation_id = %request.correlation_id(),
            features = ?request.features().enabled().collect::<Vec<_>>(),
            "Analysis completed"
        );
        view.ok_or_else(|| TextLensError::persistence("Stored analysis is missing"))
    }

    /// Makes a stored record active and returns it, without any network call.
    ///
    /// Unknown ids leave the current selection unchanged and return `None`.
    pub async fn show(&self, id: &CorrelationId) -> Option<AnalysisView> {
        let mut store = self.store.lock().await;
        if !store.select(id) {
            tracing::debug!(correlation_id = %id, "No stored analysis with this id");
            return None;
        }
        store.active_record().map(AnalysisView::of)
    }

    /// The active record, if any.
    pub async fn active(&self) -> Option<AnalysisView> {
        self.store.lock().await.active_record().map(AnalysisView::of)
    }

    /// Snapshot of the history, newest first.
    pub async fn history(&self) -> Vec<HistoryRecord> {
        self.store.lock().await.all().to_vec()
    }

    /// Looks a record up by a unique prefix of its correlation id.
    pub async fn resolve_id(&self, prefix: &str) -> Option<CorrelationId> {
        let store = self.store.lock().await;
        let mut matches = store
            .all()
            .iter()
            .filter(|r| r.correlation_id.as_str().starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(record), None) => Some(record.correlation_id.clone()),
            _ => None,
        }
    }

    /// Removes every record and clears the selection.
    pub async fn clear_history(&self) {
        self.store.lock().await.clear();
        tracing::debug!("Cleared analysis history");
    }

    async fn set_status(&self, status: WorkbenchStatus) {
        *self.status.write().await = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;
    use textlens_core::{AnalysisResult, Feature, NullHistoryRepository, build_descriptor};

    struct EchoDispatcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AnalysisDispatcher for EchoDispatcher {
        async fn dispatch(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AnalysisResult::from_value(json!({
                "summary": { "text": format!("about {}", request.input_value()) }
            }))
            .unwrap())
        }
    }

    fn workbench() -> (AnalysisWorkbench, Arc<EchoDispatcher>) {
        let dispatcher = Arc::new(EchoDispatcher {
            calls: AtomicUsize::new(0),
        });
        let store = HistoryStore::open(Arc::new(NullHistoryRepository));
        (AnalysisWorkbench::new(dispatcher.clone(), store), dispatcher)
    }

    fn summarize() -> FeatureDescriptor {
        build_descriptor([(Feature::Summarize, true)]).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_selects_new_record() {
        let (workbench, dispatcher) = workbench();

        let view = workbench
            .analyze(InputMode::Text, "  otters  ", summarize())
            .await
            .unwrap();

        assert_eq!(view.record.input_value, "otters");
        assert_eq!(view.plan.features(), vec![Feature::Summarize]);
        assert_eq!(workbench.active().await, Some(view));
        assert_eq!(workbench.status().await, WorkbenchStatus::Idle);
        assert!(!workbench.is_busy());
        assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_validation_failure_skips_dispatch() {
        let (workbench, dispatcher) = workbench();

        let err = workbench
            .analyze(InputMode::Text, "   ", summarize())
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 0);
        assert!(matches!(workbench.status().await, WorkbenchStatus::Failed(_)));
        assert!(!workbench.is_busy());
    }

    #[tokio::test]
    async fn test_show_switches_active_record() {
        let (workbench, _) = workbench();
        let first = workbench
            .analyze(InputMode::Text, "first", summarize())
            .await
            .unwrap();
        workbench
            .analyze(InputMode::Text, "second", summarize())
            .await
            .unwrap();

        let shown = workbench.show(&first.record.correlation_id).await.unwrap();
        assert_eq!(shown.record.input_value, "first");
        assert_eq!(
            workbench.active().await.unwrap().record.correlation_id,
            first.record.correlation_id
        );

        assert!(workbench.show(&CorrelationId::from("missing")).await.is_none());
        assert_eq!(
            workbench.active().await.unwrap().record.correlation_id,
            first.record.correlation_id
        );
    }

    #[tokio::test]
    async fn test_clear_history() {
        let (workbench, _) = workbench();
        workbench
            .analyze(InputMode::Text, "text", summarize())
            .await
            .unwrap();

        workbench.clear_history().await;
        assert!(workbench.history().await.is_empty());
        assert!(workbench.active().await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_id_by_prefix() {
        let (workbench, _) = workbench();
        let view = workbench
            .analyze(InputMode::Text, "text", summarize())
            .await
            .unwrap();
        let id = view.record.correlation_id.clone();

        assert_eq!(workbench.resolve_id(&id.as_str()[..8]).await, Some(id));
        assert_eq!(workbench.resolve_id("zzzz").await, None);
    }

    #[test]
    fn test_in_flight_guard_releases_on_drop() {
        let flag = AtomicBool::new(false);
        let guard = InFlightGuard::acquire(&flag).unwrap();
        assert!(InFlightGuard::acquire(&flag).is_none());
        drop(guard);
        assert!(InFlightGuard::acquire(&flag).is_some());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_value(WorkbenchStatus::Failed("boom".into())).unwrap(),
            json!({ "state": "failed", "message": "boom" })
        );
        assert_eq!(
            serde_json::to_value(WorkbenchStatus::Idle).unwrap(),
            json!({ "state": "idle" })
        );
    }
}
