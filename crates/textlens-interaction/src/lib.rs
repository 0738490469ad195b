//! Network adapters for TextLens.

pub mod http_analysis_client;

pub use http_analysis_client::{HttpAnalysisClient, REQUEST_ID_HEADER};
