use anyhow::{Result, anyhow};
use textlens_application::open_workbench;
use textlens_core::{Feature, FeatureDescriptor, InputMode, build_descriptor};
use textlens_infrastructure::load_config;

use super::render;
use crate::AnalyzeArgs;

pub async fn run(args: AnalyzeArgs) -> Result<()> {
    let config = load_config()?;
    let mut workbench = open_workbench(&config)?;
    if let Some(language) = &args.language {
        workbench = workbench.with_language(language.clone());
    }

    let features = if args.all {
        FeatureDescriptor::all()
    } else {
        build_descriptor([
            (Feature::Summarize, args.summarize),
            (Feature::Topics, args.topics),
            (Feature::Sentiment, args.sentiment),
            (Feature::Intents, args.intents),
        ])
        .map_err(|e| anyhow!("{} (pass --summarize, --topics, --sentiment, --intents or --all)", e.user_message()))?
    };
    let mode = if args.url { InputMode::Url } else { InputMode::Text };

    let view = workbench
        .analyze(mode, &args.input, features)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::view(&view));
    }
    Ok(())
}
