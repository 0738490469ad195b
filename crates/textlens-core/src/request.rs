//! Analysis request construction.
//!
//! An [`AnalysisRequest`] can only be obtained through [`AnalysisRequest::new`],
//! which enforces the dispatch preconditions and mints the correlation id.
//! Once built it is immutable.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::error::{Result, TextLensError};
use crate::feature::FeatureDescriptor;

/// Language hint sent when the caller has no preference.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Whether the analyzed input is raw text or a URL fetched by the service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputMode {
    #[default]
    Text,
    Url,
}

/// Opaque identifier tying one request/response pair to its history record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Mints a fresh identifier (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CorrelationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CorrelationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single, validated analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    correlation_id: CorrelationId,
    input_mode: InputMode,
    input_value: String,
    features: FeatureDescriptor,
    language: String,
}

impl AnalysisRequest {
    /// Validates the input and builds a request with a fresh correlation id.
    ///
    /// # Errors
    ///
    /// Returns [`TextLensError::Validation`] when:
    /// - `input_value` is empty after trimming
    /// - `input_mode` is [`InputMode::Url`] and the value is not an absolute http(s) URL
    /// - no feature is enabled in `features`
    pub fn new(
        input_mode: InputMode,
        input_value: &str,
        features: FeatureDescriptor,
        language: &str,
    ) -> Result<Self> {
        let input_value = input_value.trim();
        if input_value.is_empty() {
            return Err(TextLensError::validation(match input_mode {
                InputMode::Text => "input text is empty",
                InputMode::Url => "input URL is empty",
            }));
        }
        if input_mode == InputMode::Url {
            validate_url(input_value)?;
        }
        features.validate()?;

        let language = match language.trim() {
            "" => DEFAULT_LANGUAGE,
            hint => hint,
        };

        Ok(Self {
            correlation_id: CorrelationId::generate(),
            input_mode,
            input_value: input_value.to_string(),
            features,
            language: language.to_string(),
        })
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn features(&self) -> &FeatureDescriptor {
        &self.features
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

fn validate_url(value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| TextLensError::validation(format!("invalid URL: {}", e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(TextLensError::validation(format!(
            "invalid URL: unsupported scheme '{}'",
            other
        ))),
    }
}
