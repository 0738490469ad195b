use anyhow::{Result, anyhow};
use textlens_application::{AnalysisWorkbench, open_workbench};
use textlens_infrastructure::load_config;

use super::render;

const PREVIEW_CHARS: usize = 48;

fn workbench() -> Result<AnalysisWorkbench> {
    let config = load_config()?;
    Ok(open_workbench(&config)?)
}

pub async fn list(json: bool) -> Result<()> {
    let records = workbench()?.history().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    if records.is_empty() {
        println!("No stored analyses.");
        return Ok(());
    }
    for record in &records {
        println!("{}", render::history_line(record, PREVIEW_CHARS));
    }
    Ok(())
}

pub async fn show(id: &str, json: bool) -> Result<()> {
    let workbench = workbench()?;
    let resolved = workbench
        .resolve_id(id)
        .await
        .ok_or_else(|| anyhow!("No stored analysis matches '{}'", id))?;
    let view = workbench
        .show(&resolved)
        .await
        .ok_or_else(|| anyhow!("No stored analysis matches '{}'", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::view(&view));
    }
    Ok(())
}

pub async fn clear() -> Result<()> {
    let workbench = workbench()?;
    let count = workbench.history().await.len();
    workbench.clear_history().await;
    println!("Removed {} stored analyses.", count);
    Ok(())
}
