//! Plain-text rendering of analyses for the terminal.

use std::fmt::Write;

use textlens_application::AnalysisView;
use textlens_core::{BlockContent, Feature, HistoryRecord, LabeledItem, RenderBlock};

fn heading(feature: Feature) -> &'static str {
    match feature {
        Feature::Summarize => "Summary",
        Feature::Topics => "Topics",
        Feature::Sentiment => "Sentiment",
        Feature::Intents => "Intents",
    }
}

/// Renders a record header followed by one section per requested feature.
pub fn view(view: &AnalysisView) -> String {
    let record = &view.record;
    let mut out = String::new();
    let _ = writeln!(out, "Analysis {}", record.correlation_id);
    let _ = writeln!(out, "  at:    {}", record.timestamp);
    let _ = writeln!(out, "  input: [{}] {}", record.input_mode, record.preview(72));

    for block in &view.plan.blocks {
        out.push('\n');
        block_into(&mut out, block);
    }
    out
}

fn block_into(out: &mut String, block: &RenderBlock) {
    let _ = writeln!(out, "{}", heading(block.feature));
    match &block.content {
        BlockContent::NoData => {
            let _ = writeln!(out, "  (no data)");
        }
        BlockContent::Summary { text } => {
            let _ = writeln!(out, "  {}", text);
        }
        BlockContent::Labels { items } => {
            for item in items {
                let _ = writeln!(out, "  - {}", label(item));
            }
        }
        BlockContent::Sentiment {
            label,
            score,
            segments_analyzed,
        } => {
            let _ = match score {
                Some(score) => writeln!(out, "  {} ({})", label, score),
                None => writeln!(out, "  {}", label),
            };
            if let Some(count) = segments_analyzed {
                let _ = writeln!(out, "  segments analyzed: {}", count);
            }
        }
    }
}

fn label(item: &LabeledItem) -> String {
    match &item.confidence {
        Some(confidence) => format!("{} ({})", item.label, confidence),
        None => item.label.clone(),
    }
}

/// One line of `history list` output.
pub fn history_line(record: &HistoryRecord, preview_chars: usize) -> String {
    let features = record
        .features
        .enabled()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{}  {}  {:<4}  {:<36}  {}",
        record.correlation_id,
        record.timestamp,
        record.input_mode.to_string(),
        features,
        record.preview(preview_chars)
    )
}
