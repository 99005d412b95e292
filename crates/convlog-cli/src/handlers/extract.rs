use anyhow::Result;
use convlog_runtime::{Outcome, Overrides, Pipeline, SessionTarget, Settings, SkipReason};

pub async fn handle(
    overrides: Overrides,
    agent: String,
    session: String,
    session_key: Option<String>,
) -> Result<()> {
    let settings = Settings::resolve(&overrides)?;
    let target = SessionTarget::new(agent, session).with_session_key(session_key);

    match Pipeline::new(settings).extract(&target).await? {
        Outcome::Written { path, records } => {
            println!("Wrote {} record(s) to {}", records, path.display());
        }
        Outcome::Skipped(reason) => println!("Nothing written: {}", describe(reason)),
    }

    Ok(())
}

fn describe(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::IgnoredEvent => "event does not trigger extraction",
        SkipReason::MissingContext => "agent or session id missing",
        SkipReason::InvalidId => "agent or session id is not a valid file name",
        SkipReason::EmptyJournal => "journal is missing or empty",
        SkipReason::NoTurns => "journal has no user message yet",
        SkipReason::UpToDate => "all turns already written",
    }
}
