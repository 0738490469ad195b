//! Feature selection.
//!
//! Converts the user's on/off toggles into the [`FeatureDescriptor`] that is
//! sent with every analysis request and stored alongside its history record.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::error::{Result, TextLensError};

/// An intelligence feature offered by the analysis service.
///
/// The declaration order is the canonical display order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Feature {
    Summarize,
    Topics,
    Sentiment,
    Intents,
}

impl Feature {
    /// All features in canonical order.
    pub const ALL: [Feature; 4] = [
        Feature::Summarize,
        Feature::Topics,
        Feature::Sentiment,
        Feature::Intents,
    ];

    /// Wire name used in query parameters and persisted records.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// The set of features requested for one analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    #[serde(default)]
    pub summarize: bool,
    #[serde(default)]
    pub topics: bool,
    #[serde(default)]
    pub sentiment: bool,
    #[serde(default)]
    pub intents: bool,
}

impl FeatureDescriptor {
    /// Descriptor with every feature enabled.
    pub fn all() -> Self {
        Self {
            summarize: true,
            topics: true,
            sentiment: true,
            intents: true,
        }
    }

    /// Returns whether `feature` is requested.
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Summarize => self.summarize,
            Feature::Topics => self.topics,
            Feature::Sentiment => self.sentiment,
            Feature::Intents => self.intents,
        }
    }

    /// Turns a single feature on or off.
    pub fn set(&mut self, feature: Feature, enabled: bool) {
        match feature {
            Feature::Summarize => self.summarize = enabled,
            Feature::Topics => self.topics = enabled,
            Feature::Sentiment => self.sentiment = enabled,
            Feature::Intents => self.intents = enabled,
        }
    }

    /// Requested features in canonical order.
    pub fn enabled(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL
            .into_iter()
            .filter(move |f| self.is_enabled(*f))
    }

    /// True when at least one feature is requested.
    pub fn any_enabled(&self) -> bool {
        self.enabled().next().is_some()
    }

    /// Fails with a validation error when nothing is requested.
    pub fn validate(&self) -> Result<()> {
        if self.any_enabled() {
            Ok(())
        } else {
            Err(TextLensError::validation("no feature selected"))
        }
    }

    /// Query parameters for the analysis endpoint.
    ///
    /// Only enabled features appear, each with the value `"true"`.
    pub fn query_pairs(&self) -> Vec<(&'static str, &'static str)> {
        self.enabled().map(|f| (f.as_str(), "true")).collect()
    }
}

/// Builds a validated descriptor from feature toggles.
///
/// Features that are not mentioned stay disabled. Fails when every toggle is
/// off; the caller must not dispatch a request in that case.
pub fn build_descriptor<I>(toggles: I) -> Result<FeatureDescriptor>
where
    I: IntoIterator<Item = (Feature, bool)>,
{
    let mut descriptor = FeatureDescriptor::default();
    for (feature, enabled) in toggles {
        descriptor.set(feature, enabled);
    }
    descriptor.validate()?;
    Ok(descriptor)
}

/// Like [`build_descriptor`], keyed by wire name (`"summarize"`, `"topics"`, ...).
pub fn build_descriptor_from_names<'a, I>(toggles: I) -> Result<FeatureDescriptor>
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    let parsed = toggles
        .into_iter()
        .map(|(name, enabled)| {
            Feature::from_str(name)
                .map(|feature| (feature, enabled))
                .map_err(|_| TextLensError::validation(format!("unknown feature '{}'", name)))
        })
        .collect::<Result<Vec<_>>>()?;
    build_descriptor(parsed)
}
