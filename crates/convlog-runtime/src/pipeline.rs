//! One extraction pass per lifecycle trigger.
//!
//! Each invocation reads the journal from disk, rebuilds every turn, and
//! appends what the configured mode calls for. Nothing survives between
//! invocations except the output files themselves.

use crate::config::Settings;
use crate::dedup::last_written_index;
use crate::paths::OutputPaths;
use crate::writer::append_payloads;
use crate::Result;
use chrono::{SecondsFormat, Utc};
use convlog_engine::{
    AssemblyInput, FullAssembler, OutputMode, Payload, PayloadAssembler, assembler_for,
    build_turns,
};
use convlog_journal::{journal_path, read_journal, session_header};
use convlog_types::{
    JournalEntry, LifecycleContext, LifecycleEvent, SessionMeta, SessionStartDocument,
    TriggerKind,
};
use std::path::PathBuf;
use tracing::{debug, info};

/// The session a trigger refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTarget {
    pub agent_id: String,
    pub session_id: String,
    pub session_key: Option<String>,
}

impl SessionTarget {
    pub fn new(agent_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            session_id: session_id.into(),
            session_key: None,
        }
    }

    pub fn with_session_key(mut self, session_key: Option<String>) -> Self {
        self.session_key = session_key;
        self
    }

    /// `None` unless the context names both an agent and a session.
    pub fn from_context(context: &LifecycleContext) -> Option<Self> {
        let agent_id = context.agent_id.as_deref().filter(|id| !id.is_empty())?;
        let session_id = context.session_id.as_deref().filter(|id| !id.is_empty())?;

        Some(Self::new(agent_id, session_id).with_session_key(context.session_key.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Not one of the lifecycle events that trigger extraction.
    IgnoredEvent,
    /// Event context lacked an agent or session id.
    MissingContext,
    /// An id could not be used as a path component.
    InvalidId,
    /// Journal missing, unreadable, or without a single parseable line.
    EmptyJournal,
    /// Journal parsed but no user message has been seen yet.
    NoTurns,
    /// Every turn is already in the output file.
    UpToDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped(SkipReason),
    Written { path: PathBuf, records: usize },
}

impl Outcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Outcome::Written { .. })
    }
}

pub struct Pipeline {
    settings: Settings,
}

impl Pipeline {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Dispatch a lifecycle event.
    ///
    /// `agent:bootstrap` appends a session-start marker before extracting;
    /// `command:new` and `message:sent` only extract. Other events, and
    /// events without agent and session ids, do nothing.
    pub async fn handle_event(&self, event: &LifecycleEvent) -> Result<Outcome> {
        let trigger = event.trigger();
        if trigger == TriggerKind::Other {
            debug!(event = %event.event_type, "ignoring event");
            return Ok(Outcome::Skipped(SkipReason::IgnoredEvent));
        }

        let Some(target) = SessionTarget::from_context(&event.context) else {
            debug!(?trigger, "event context has no agent or session id");
            return Ok(Outcome::Skipped(SkipReason::MissingContext));
        };

        if trigger == TriggerKind::Bootstrap {
            self.write_session_start(&target).await?;
        }

        self.extract(&target).await
    }

    /// Append a session-start marker line to the session's `.jsonl` file.
    pub async fn write_session_start(&self, target: &SessionTarget) -> Result<Outcome> {
        let Ok(paths) = self.output_paths(target) else {
            return Ok(Outcome::Skipped(SkipReason::InvalidId));
        };

        let journal = journal_path(
            &self.settings.state_dir,
            &target.agent_id,
            &target.session_id,
        )?;
        let entries = read_journal(&journal).await;
        let session = session_meta(target, &entries);

        let marker = Payload::SessionStart(SessionStartDocument::new(&session, now()));
        let path = paths.turn_log();
        append_payloads(&path, &[marker]).await?;

        info!(agent = %target.agent_id, session = %target.session_id, "session start recorded");
        Ok(Outcome::Written { path, records: 1 })
    }

    /// Rebuild the session's turns and append them in the configured mode.
    pub async fn extract(&self, target: &SessionTarget) -> Result<Outcome> {
        let Ok(paths) = self.output_paths(target) else {
            return Ok(Outcome::Skipped(SkipReason::InvalidId));
        };
        let journal = journal_path(
            &self.settings.state_dir,
            &target.agent_id,
            &target.session_id,
        )?;

        let entries = read_journal(&journal).await;
        if entries.is_empty() {
            debug!(path = %journal.display(), "journal empty or unreadable");
            return Ok(Outcome::Skipped(SkipReason::EmptyJournal));
        }

        let turns = build_turns(&entries);
        if turns.is_empty() {
            debug!(path = %journal.display(), "journal has no user message yet");
            return Ok(Outcome::Skipped(SkipReason::NoTurns));
        }

        let session = session_meta(target, &entries);
        let extracted_at = now();
        let mode = self.settings.mode;
        let path = paths.for_mode(mode);

        // Turn indices equal their position, so the unwritten turns are a suffix.
        let pending = match mode {
            OutputMode::Incremental => {
                let start = last_written_index(&path, &session.session_id)
                    .await
                    .map_or(0, |last| last + 1)
                    .min(turns.len());
                &turns[start..]
            }
            OutputMode::Full | OutputMode::Optimized => &turns[..],
        };
        if pending.is_empty() {
            debug!(path = %path.display(), "no new turns");
            return Ok(Outcome::Skipped(SkipReason::UpToDate));
        }

        let input = AssemblyInput {
            session: &session,
            turns: pending,
            total_entries: entries.len(),
            extracted_at: &extracted_at,
        };
        let payloads = assembler_for(mode, self.settings.truncation).assemble(&input);
        append_payloads(&path, &payloads).await?;

        if self.settings.verbose && mode != OutputMode::Full {
            let raw = FullAssembler.assemble(&AssemblyInput {
                turns: &turns,
                ..input
            });
            append_payloads(&paths.raw_log(), &raw).await?;
        }

        info!(
            agent = %target.agent_id,
            session = %target.session_id,
            %mode,
            turns = pending.len(),
            "conversation extracted"
        );
        Ok(Outcome::Written {
            path,
            records: payloads.len(),
        })
    }

    fn output_paths(&self, target: &SessionTarget) -> Result<OutputPaths> {
        OutputPaths::new(&self.settings.output_dir, &target.agent_id, &target.session_id)
            .inspect_err(|err| debug!(error = %err, "refusing to build output path"))
    }
}

fn session_meta(target: &SessionTarget, entries: &[JournalEntry]) -> SessionMeta {
    let cwd = session_header(entries).and_then(|header| header.cwd.clone());
    SessionMeta::new(
        target.agent_id.as_str(),
        target.session_id.as_str(),
        target.session_key.clone(),
        cwd,
    )
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
