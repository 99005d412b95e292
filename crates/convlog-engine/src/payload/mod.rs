//! Output strategies.
//!
//! Turn reconstruction happens once; the deployment mode only picks which
//! assembler turns the result into documents.

mod full;
mod incremental;
mod optimized;

pub use full::FullAssembler;
pub use incremental::IncrementalAssembler;
pub use optimized::OptimizedAssembler;

use crate::truncate::TruncationBudget;
use convlog_types::{
    CompactTurn, ConversationDocument, SessionMeta, SessionStartDocument, Turn, TurnDocument,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Whole conversation, untruncated.
    Full,
    /// Whole conversation with bounded text and tool previews.
    Optimized,
    /// One line per turn not yet written.
    #[default]
    Incremental,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(OutputMode::Full),
            "optimized" => Ok(OutputMode::Optimized),
            "incremental" => Ok(OutputMode::Incremental),
            _ => Err(format!("Unknown output mode: {}", s)),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Full => write!(f, "full"),
            OutputMode::Optimized => write!(f, "optimized"),
            OutputMode::Incremental => write!(f, "incremental"),
        }
    }
}

/// How a payload is laid out in its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Separator line followed by pretty-printed JSON.
    Block,
    /// One compact JSON line.
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Conversation(ConversationDocument<Turn>),
    Compact(ConversationDocument<CompactTurn>),
    Turn(TurnDocument),
    SessionStart(SessionStartDocument),
}

impl Payload {
    pub fn schema(&self) -> &str {
        match self {
            Payload::Conversation(doc) => &doc.schema,
            Payload::Compact(doc) => &doc.schema,
            Payload::Turn(doc) => &doc.schema,
            Payload::SessionStart(doc) => &doc.schema,
        }
    }

    pub fn extracted_at(&self) -> &str {
        match self {
            Payload::Conversation(doc) => &doc.extracted_at,
            Payload::Compact(doc) => &doc.extracted_at,
            Payload::Turn(doc) => &doc.extracted_at,
            Payload::SessionStart(doc) => &doc.extracted_at,
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            Payload::Conversation(_) | Payload::Compact(_) => Layout::Block,
            Payload::Turn(_) | Payload::SessionStart(_) => Layout::Line,
        }
    }
}

/// Everything an assembler may look at. `extracted_at` is supplied by the
/// caller so assembly stays a pure function.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyInput<'a> {
    pub session: &'a SessionMeta,
    pub turns: &'a [Turn],
    /// Parsed journal lines, including unrecognised ones.
    pub total_entries: usize,
    pub extracted_at: &'a str,
}

pub trait PayloadAssembler {
    fn mode(&self) -> OutputMode;

    fn assemble(&self, input: &AssemblyInput<'_>) -> Vec<Payload>;
}

pub fn assembler_for(mode: OutputMode, budget: TruncationBudget) -> Box<dyn PayloadAssembler> {
    match mode {
        OutputMode::Full => Box::new(FullAssembler),
        OutputMode::Optimized => Box::new(OptimizedAssembler::new(budget)),
        OutputMode::Incremental => Box::new(IncrementalAssembler),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode_round_trips_through_str() {
        for mode in [OutputMode::Full, OutputMode::Optimized, OutputMode::Incremental] {
            assert_eq!(mode.to_string().parse::<OutputMode>(), Ok(mode));
        }
        assert!("verbose".parse::<OutputMode>().is_err());
    }

    #[test]
    fn test_assembler_for_selects_mode() {
        let budget = TruncationBudget::default();
        assert_eq!(assembler_for(OutputMode::Full, budget).mode(), OutputMode::Full);
        assert_eq!(
            assembler_for(OutputMode::Optimized, budget).mode(),
            OutputMode::Optimized
        );
        assert_eq!(
            assembler_for(OutputMode::Incremental, budget).mode(),
            OutputMode::Incremental
        );
    }
}
