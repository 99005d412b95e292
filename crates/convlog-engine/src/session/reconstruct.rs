use std::collections::HashMap;

use super::turn_builder::TurnBuilder;
use convlog_journal::extract_text;
use convlog_types::{JournalEntry, Message, MessageEntry, ToolResultMessage, Turn};

/// Where a still-unresolved tool call lives: turn index, then position
/// within that turn's call list.
#[derive(Debug, Clone, Copy)]
struct PendingCall {
    turn: usize,
    call: usize,
}

/// Single-pass turn reconstruction over a journal.
///
/// Two states: no turn open (before the first user message) and one turn
/// open. The pending-call table lives for the whole pass, not per turn, so a
/// result that shows up after its turn was closed still lands on its call.
pub struct TurnReconstructor {
    turns: Vec<Turn>,
    current: Option<TurnBuilder>,
    pending_calls: HashMap<String, PendingCall>,
}

impl Default for TurnReconstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnReconstructor {
    pub fn new() -> Self {
        Self {
            turns: Vec::new(),
            current: None,
            pending_calls: HashMap::new(),
        }
    }

    pub fn push(&mut self, entry: &JournalEntry) {
        let Some(entry) = entry.as_message() else {
            return;
        };

        match &entry.message {
            Message::User(user) => {
                self.close_current();
                self.current = Some(TurnBuilder::new(
                    self.turns.len(),
                    entry.effective_timestamp().cloned(),
                    extract_text(user.content.as_ref()),
                ));
            }

            Message::Assistant(assistant) => {
                // Nothing to attribute it to before the first user message.
                let Some(builder) = self.current.as_mut() else {
                    return;
                };

                let turn = builder.index();
                for (id, call) in builder.add_assistant(assistant) {
                    self.pending_calls.insert(id, PendingCall { turn, call });
                }
            }

            Message::ToolResult(result) => {
                if self.current.is_some() {
                    self.resolve(entry, result);
                }
            }

            Message::Other => {}
        }
    }

    fn resolve(&mut self, entry: &MessageEntry, result: &ToolResultMessage) {
        let Some(id) = result.call_id() else {
            return;
        };
        let Some(pending) = self.pending_calls.remove(id) else {
            return;
        };

        let call = if pending.turn < self.turns.len() {
            self.turns[pending.turn].tool_calls.get_mut(pending.call)
        } else {
            self.current
                .as_mut()
                .and_then(|builder| builder.tool_call_mut(pending.call))
        };

        if let Some(call) = call {
            let content = result.content.as_ref().or(entry.content.as_ref());
            call.result = Some(extract_text(content));
            call.is_error = Some(result.is_error.unwrap_or(false));
        }
    }

    fn close_current(&mut self) {
        if let Some(builder) = self.current.take() {
            self.turns.push(builder.build());
        }
    }

    /// Close the open turn, if any, and hand back every turn in order.
    pub fn finish(mut self) -> Vec<Turn> {
        self.close_current();
        self.turns
    }
}
