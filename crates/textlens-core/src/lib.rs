//! Domain layer for TextLens.
//!
//! Holds the feature selector, request construction, the result model, the
//! bounded analysis history with its active selection, and the presenter
//! that turns results into render plans. I/O happens behind the
//! [`AnalysisDispatcher`] and [`HistoryRepository`] traits.

pub mod dispatch;
pub mod error;
pub mod feature;
pub mod history;
pub mod presenter;
pub mod request;
pub mod result;

pub use dispatch::AnalysisDispatcher;
pub use error::{Result, TextLensError};
pub use feature::{Feature, FeatureDescriptor, build_descriptor, build_descriptor_from_names};
pub use history::{
    ActiveSelection, DEFAULT_HISTORY_CAPACITY, HistoryRecord, HistoryRepository, HistoryStore,
    NullHistoryRepository,
};
pub use presenter::{BlockContent, LabeledItem, RenderBlock, RenderPlan, present};
pub use request::{AnalysisRequest, CorrelationId, DEFAULT_LANGUAGE, InputMode};
pub use result::{AnalysisResult, SectionState};
