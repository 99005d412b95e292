use super::{AssemblyInput, OutputMode, Payload, PayloadAssembler};
use crate::stats::conversation_stats;
use convlog_types::{CONVERSATION_SCHEMA, ConversationDocument};

/// Whole conversation, every field untruncated.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullAssembler;

impl PayloadAssembler for FullAssembler {
    fn mode(&self) -> OutputMode {
        OutputMode::Full
    }

    fn assemble(&self, input: &AssemblyInput<'_>) -> Vec<Payload> {
        vec![Payload::Conversation(ConversationDocument {
            schema: CONVERSATION_SCHEMA.to_string(),
            extracted_at: input.extracted_at.to_string(),
            session: input.session.clone(),
            stats: conversation_stats(input.turns, input.total_entries),
            turns: input.turns.to_vec(),
        })]
    }
}
