//! Wiring of the workbench from configuration.

use std::sync::Arc;

use textlens_core::{HistoryStore, Result};
use textlens_infrastructure::{SlotHistoryRepository, TextLensConfig};
use textlens_interaction::HttpAnalysisClient;

use crate::workbench::AnalysisWorkbench;

/// Builds a workbench talking HTTP to the configured service and keeping
/// its history in the configured file.
pub fn open_workbench(config: &TextLensConfig) -> Result<AnalysisWorkbench> {
    let history_path = config.history_path()?;
    tracing::debug!(
        endpoint = %config.service.endpoint(),
        history = %history_path.display(),
        "Opening workbench"
    );

    let repository = Arc::new(SlotHistoryRepository::with_file(history_path));
    let store = HistoryStore::open_with_capacity(repository, config.history.capacity);
    let dispatcher = Arc::new(HttpAnalysisClient::from_config(&config.service)?);

    Ok(AnalysisWorkbench::new(dispatcher, store).with_language(config.service.language.clone()))
}
