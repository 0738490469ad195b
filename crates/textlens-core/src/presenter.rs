//! Result presentation.
//!
//! Maps an [`AnalysisResult`] and the descriptor that produced it to a
//! [`RenderPlan`]: one block per requested feature, in canonical order, with
//! an explicit [`BlockContent::NoData`] marker where the service returned
//! nothing. Rendering layers consume the plan; this module does no I/O.

use serde::Serialize;

use crate::feature::{Feature, FeatureDescriptor};
use crate::result::{AnalysisResult, SectionState};

/// A label with an optional confidence, rendered to two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

/// What a block shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockContent {
    /// The feature was requested but the service returned nothing for it.
    NoData,
    Summary {
        text: String,
    },
    /// Flattened topics or intents, segment order then item order.
    Labels {
        items: Vec<LabeledItem>,
    },
    Sentiment {
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        score: Option<String>,
        /// Number of analyzed segments, when segment data exists
        #[serde(skip_serializing_if = "Option::is_none")]
        segments_analyzed: Option<usize>,
    },
}

/// Display block for one feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderBlock {
    pub feature: Feature,
    pub content: BlockContent,
}

impl RenderBlock {
    pub fn is_empty(&self) -> bool {
        self.content == BlockContent::NoData
    }
}

/// Ordered blocks for the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    pub blocks: Vec<RenderBlock>,
}

impl RenderPlan {
    pub fn features(&self) -> Vec<Feature> {
        self.blocks.iter().map(|b| b.feature).collect()
    }

    pub fn block(&self, feature: Feature) -> Option<&RenderBlock> {
        self.blocks.iter().find(|b| b.feature == feature)
    }
}

/// Builds the render plan for `result` as requested by `descriptor`.
pub fn present(result: &AnalysisResult, descriptor: &FeatureDescriptor) -> RenderPlan {
    let blocks = descriptor
        .enabled()
        .map(|feature| RenderBlock {
            feature,
            content: block_content(result, feature),
        })
        .collect();
    RenderPlan { blocks }
}

fn block_content(result: &AnalysisResult, feature: Feature) -> BlockContent {
    if result.section_state(feature) != SectionState::Populated {
        return BlockContent::NoData;
    }

    match feature {
        Feature::Summarize => match &result.summary {
            Some(summary) => BlockContent::Summary {
                text: summary.text.trim().to_string(),
            },
            None => BlockContent::NoData,
        },
        Feature::Topics => {
            let items = result
                .topics
                .iter()
                .flat_map(|t| &t.segments)
                .flat_map(|s| &s.topics)
                .map(|t| labeled(&t.topic, t.confidence_score))
                .collect();
            BlockContent::Labels { items }
        }
        Feature::Intents => {
            let items = result
                .intents
                .iter()
                .flat_map(|i| &i.segments)
                .flat_map(|s| &s.intents)
                .map(|i| labeled(&i.intent, i.confidence_score))
                .collect();
            BlockContent::Labels { items }
        }
        Feature::Sentiment => {
            let Some(sentiments) = &result.sentiments else {
                return BlockContent::NoData;
            };
            let Some((label, score)) = sentiments.label() else {
                return BlockContent::NoData;
            };
            BlockContent::Sentiment {
                label: label.to_string(),
                score: score.map(format_score),
                segments_analyzed: (!sentiments.segments.is_empty())
                    .then_some(sentiments.segments.len()),
            }
        }
    }
}

fn labeled(label: &str, confidence: Option<f64>) -> LabeledItem {
    LabeledItem {
        label: label.to_string(),
        confidence: confidence.map(format_score),
    }
}

fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}
