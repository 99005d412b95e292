use super::{AssemblyInput, OutputMode, Payload, PayloadAssembler};
use crate::stats::conversation_stats;
use crate::truncate::{TruncationBudget, truncate};
use convlog_types::{
    CONVERSATION_SCHEMA, CompactToolCall, CompactTurn, ConversationDocument, ToolCall, Turn,
};
use serde_json::Value;

/// Same envelope as the full payload, with text fields cut to budget and tool
/// calls reduced to their shape. Keeps file contents and other large tool
/// payloads from being shipped to a remote collector.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizedAssembler {
    budget: TruncationBudget,
}

impl OptimizedAssembler {
    pub fn new(budget: TruncationBudget) -> Self {
        Self { budget }
    }

    fn compact_turn(&self, turn: &Turn) -> CompactTurn {
        CompactTurn {
            index: turn.index,
            timestamp: turn.timestamp.clone(),
            user_message: truncate(&turn.user_message, self.budget.text),
            thinking: turn
                .thinking
                .as_deref()
                .filter(|t| !t.is_empty())
                .map(|t| truncate(t, self.budget.thinking)),
            tool_calls: turn
                .tool_calls
                .iter()
                .map(|call| self.compact_tool_call(call))
                .collect(),
            response: truncate(&turn.response, self.budget.text),
            model: turn.model.clone(),
            stop_reason: turn.stop_reason.clone(),
            usage: turn.usage.clone(),
        }
    }

    fn compact_tool_call(&self, call: &ToolCall) -> CompactToolCall {
        let input_keys = match &call.input {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        };

        CompactToolCall {
            name: call.name.clone(),
            input_keys,
            input_preview: truncate(&call.input.to_string(), self.budget.tool_input),
            result_preview: call
                .result
                .as_deref()
                .map(|r| truncate(r, self.budget.tool_result)),
            is_error: call.is_error,
        }
    }
}

impl PayloadAssembler for OptimizedAssembler {
    fn mode(&self) -> OutputMode {
        OutputMode::Optimized
    }

    fn assemble(&self, input: &AssemblyInput<'_>) -> Vec<Payload> {
        vec![Payload::Compact(ConversationDocument {
            schema: CONVERSATION_SCHEMA.to_string(),
            extracted_at: input.extracted_at.to_string(),
            session: input.session.clone(),
            stats: conversation_stats(input.turns, input.total_entries),
            turns: input.turns.iter().map(|t| self.compact_turn(t)).collect(),
        })]
    }
}
