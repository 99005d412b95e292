use super::{AssemblyInput, OutputMode, Payload, PayloadAssembler};
use convlog_types::{SessionMeta, TURN_SCHEMA, Turn, TurnDocument};

/// One untruncated line per turn. The caller hands in only the turns that
/// have not been written yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementalAssembler;

impl IncrementalAssembler {
    pub fn assemble_turn(session: &SessionMeta, turn: &Turn, extracted_at: &str) -> TurnDocument {
        TurnDocument {
            schema: TURN_SCHEMA.to_string(),
            extracted_at: extracted_at.to_string(),
            session: session.clone(),
            turn: turn.clone(),
        }
    }
}

impl PayloadAssembler for IncrementalAssembler {
    fn mode(&self) -> OutputMode {
        OutputMode::Incremental
    }

    fn assemble(&self, input: &AssemblyInput<'_>) -> Vec<Payload> {
        input
            .turns
            .iter()
            .map(|turn| Payload::Turn(Self::assemble_turn(input.session, turn, input.extracted_at)))
            .collect()
    }
}
