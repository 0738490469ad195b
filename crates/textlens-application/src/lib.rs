//! Application layer for TextLens.
//!
//! This crate provides the `AnalysisWorkbench`, which coordinates the
//! dispatcher, the history store and the presenter on behalf of a host UI.

pub mod bootstrap;
pub mod workbench;

pub use bootstrap::open_workbench;
pub use workbench::{AnalysisView, AnalysisWorkbench, WorkbenchStatus};
