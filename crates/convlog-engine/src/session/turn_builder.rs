use super::usage::merge_usage;
use convlog_journal::thinking_text;
use convlog_types::{AssistantMessage, Content, ContentBlock, Timestamp, ToolCall, Turn, TurnUsage};

/// Accumulates one open turn until the next user message (or end of journal)
/// closes it.
pub struct TurnBuilder {
    index: usize,
    timestamp: Option<Timestamp>,
    user_message: String,

    thinking: Vec<String>,
    tool_calls: Vec<ToolCall>,
    response: String,

    model: Option<String>,
    stop_reason: Option<String>,
    usage: Option<TurnUsage>,
}

impl TurnBuilder {
    pub fn new(index: usize, timestamp: Option<Timestamp>, user_message: String) -> Self {
        Self {
            index,
            timestamp,
            user_message,
            thinking: Vec::new(),
            tool_calls: Vec::new(),
            response: String::new(),
            model: None,
            stop_reason: None,
            usage: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Fold one assistant message into the turn.
    ///
    /// Returns `(call_id, position)` for every tool call that carries an id,
    /// so the caller can register it for later result matching.
    pub fn add_assistant(&mut self, message: &AssistantMessage) -> Vec<(String, usize)> {
        if let Some(usage) = &message.usage {
            merge_usage(&mut self.usage, usage);
        }
        if let Some(model) = &message.model {
            self.model = Some(model.clone());
        }
        if let Some(stop_reason) = &message.stop_reason {
            self.stop_reason = Some(stop_reason.clone());
        }

        let mut registered = Vec::new();

        // A bare string reply is a single text block.
        if let Some(Content::PlainText(text)) = &message.content {
            self.response.push_str(text);
        }
        let blocks = message.content.as_ref().map(|c| c.blocks()).unwrap_or(&[]);

        for block in blocks {
            match block {
                ContentBlock::Thinking { .. } => {
                    if let Some(text) = thinking_text(block)
                        && !text.is_empty()
                    {
                        self.thinking.push(text.to_string());
                    }
                }
                ContentBlock::ToolCall(call) => {
                    let position = self.tool_calls.len();
                    self.tool_calls.push(ToolCall {
                        id: call.id.clone(),
                        name: call.name.clone(),
                        input: call.input.clone(),
                        result: None,
                        is_error: None,
                    });
                    if let Some(id) = &call.id {
                        registered.push((id.clone(), position));
                    }
                }
                ContentBlock::Text { text } => {
                    if let Some(text) = text {
                        self.response.push_str(text);
                    }
                }
                ContentBlock::Unknown => {}
            }
        }

        registered
    }

    pub fn tool_call_mut(&mut self, position: usize) -> Option<&mut ToolCall> {
        self.tool_calls.get_mut(position)
    }

    pub fn build(self) -> Turn {
        let thinking = self.thinking.join("\n\n");

        Turn {
            index: self.index,
            timestamp: self.timestamp,
            user_message: self.user_message,
            thinking: if thinking.is_empty() {
                None
            } else {
                Some(thinking)
            },
            tool_calls: self.tool_calls,
            response: self.response,
            model: self.model,
            stop_reason: self.stop_reason,
            usage: self.usage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assistant(value: serde_json::Value) -> AssistantMessage {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_turn_builder_basic() {
        let builder = TurnBuilder::new(0, None, "Hello".to_string());
        let turn = builder.build();

        assert_eq!(turn.user_message, "Hello");
        assert_eq!(turn.thinking, None);
        assert!(turn.tool_calls.is_empty());
        assert_eq!(turn.response, "");
        assert_eq!(turn.usage, None);
    }

    #[test]
    fn test_turn_builder_accumulates_messages() {
        let mut builder = TurnBuilder::new(3, None, "Fix it".to_string());

        let first = builder.add_assistant(&assistant(json!({
            "model": "claude-sonnet",
            "stopReason": "toolUse",
            "content": [
                {"type": "thinking", "thinking": "Look at the file"},
                {"type": "text", "text": "Reading. "},
                {"type": "toolCall", "id": "t1", "name": "read", "arguments": {"path": "a.rs"}},
                {"type": "toolCall", "name": "ls"}
            ]
        })));
        let second = builder.add_assistant(&assistant(json!({
            "stopReason": "stop",
            "content": [
                {"type": "thinking", "thinking": ""},
                {"type": "thinking", "thinking": "Now patch"},
                {"type": "text", "text": "Done."}
            ]
        })));

        assert_eq!(first, vec![("t1".to_string(), 0)]);
        assert!(second.is_empty());

        let turn = builder.build();
        assert_eq!(turn.index, 3);
        assert_eq!(turn.thinking.as_deref(), Some("Look at the file\n\nNow patch"));
        assert_eq!(turn.response, "Reading. Done.");
        assert_eq!(turn.model.as_deref(), Some("claude-sonnet"));
        assert_eq!(turn.stop_reason.as_deref(), Some("stop"));
        assert_eq!(turn.tool_calls.len(), 2);
        assert_eq!(turn.tool_calls[1].id, None);
        assert_eq!(turn.tool_calls[1].name, "ls");
        assert_eq!(turn.usage, None);
    }

    #[test]
    fn test_plain_string_assistant_content_is_response_text() {
        let mut builder = TurnBuilder::new(0, None, "q".to_string());
        builder.add_assistant(&assistant(json!({"content": "bare string"})));
        builder.add_assistant(&assistant(json!({"content": {"unexpected": 1}})));

        assert_eq!(builder.build().response, "bare string");
    }
}
