use anyhow::Result;
use convlog_runtime::{OutputPaths, Overrides, Settings, last_written_index};

pub async fn handle(overrides: Overrides, agent: &str, session: &str) -> Result<()> {
    let settings = Settings::resolve(&overrides)?;
    let paths = OutputPaths::new(&settings.output_dir, agent, session)?;

    let last = last_written_index(&paths.turn_log(), session).await;
    match last {
        Some(index) => println!("{}", index),
        None => println!("-1"),
    }

    Ok(())
}
