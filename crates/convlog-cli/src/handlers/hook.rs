use anyhow::{Context, Result};
use convlog_runtime::{Outcome, Overrides, Pipeline, Settings};
use convlog_types::LifecycleEvent;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, error};

/// Run the pipeline for one lifecycle event. Never fails: a broken event or
/// a failed write is logged and the host carries on.
pub async fn handle(overrides: Overrides, event_file: Option<PathBuf>) {
    match process(overrides, event_file).await {
        Ok(outcome) => debug!(?outcome, "hook finished"),
        Err(err) => error!("hook failed: {:#}", err),
    }
}

async fn process(overrides: Overrides, event_file: Option<PathBuf>) -> Result<Outcome> {
    let raw = match &event_file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read event from stdin")?;
            buf
        }
    };

    let event: LifecycleEvent =
        serde_json::from_str(&raw).context("Event is not a lifecycle event object")?;

    let settings = Settings::resolve(&overrides)?;
    let outcome = Pipeline::new(settings).handle_event(&event).await?;
    Ok(outcome)
}
