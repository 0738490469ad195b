//! Analysis result model.
//!
//! The service answers with one optional section per feature. Every section
//! can be absent (not in the payload), empty (present but carrying nothing
//! displayable) or populated; [`AnalysisResult::section_state`] makes that
//! distinction explicit so callers never have to guess between `null` and
//! missing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::feature::Feature;

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Summary section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// A detected topic with its confidence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopicItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

/// A span of the input and the topics found in it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopicSegment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<TopicItem>,
}

/// Topics section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopicsResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub segments: Vec<TopicSegment>,
}

/// A detected intent with its confidence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntentItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub intent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

/// A span of the input and the intents found in it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntentSegment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub intents: Vec<IntentItem>,
}

/// Intents section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntentsResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub segments: Vec<IntentSegment>,
}

/// Sentiment of one span of the input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentSegment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
}

/// Aggregate sentiment across the whole input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentAverage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
}

/// Sentiment section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub segments: Vec<SentimentSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<SentimentAverage>,
}

impl SentimentResult {
    /// Overall label and score: the average when it carries a label,
    /// otherwise the first labelled segment.
    pub fn label(&self) -> Option<(&str, Option<f64>)> {
        self.average
            .iter()
            .map(|a| (a.sentiment.as_str(), a.sentiment_score))
            .chain(
                self.segments
                    .iter()
                    .map(|s| (s.sentiment.as_str(), s.sentiment_score)),
            )
            .find(|(label, _)| !label.trim().is_empty())
    }
}

/// How much data a result carries for one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    /// The payload has no entry for the feature.
    Absent,
    /// The entry exists but holds nothing displayable.
    Empty,
    /// The entry holds data.
    Populated,
}

/// Structured payload returned by the analysis service.
///
/// Keys the client does not model (for example a language-detection result)
/// are kept in `extra` so stored history round-trips without loss.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<TopicsResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiments: Option<SentimentResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intents: Option<IntentsResult>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    /// Parses a `results` object coming from the service.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Classifies the section for `feature`.
    pub fn section_state(&self, feature: Feature) -> SectionState {
        let populated = match feature {
            Feature::Summarize => self.summary.as_ref().map(|s| !s.text.trim().is_empty()),
            Feature::Topics => self
                .topics
                .as_ref()
                .map(|t| t.segments.iter().any(|s| !s.topics.is_empty())),
            Feature::Sentiment => self
                .sentiments
                .as_ref()
                .map(|s| s.label().is_some()),
            Feature::Intents => self
                .intents
                .as_ref()
                .map(|i| i.segments.iter().any(|s| !s.intents.is_empty())),
        };

        match populated {
            None => SectionState::Absent,
            Some(false) => SectionState::Empty,
            Some(true) => SectionState::Populated,
        }
    }

    /// True when the result carries displayable data for `feature`.
    pub fn has_data(&self, feature: Feature) -> bool {
        self.section_state(feature) == SectionState::Populated
    }
}
