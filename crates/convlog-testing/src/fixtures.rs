//! Synthetic session journals.

use serde_json::{Value, json};

/// Builds journal text one line at a time.
///
/// # Example
/// ```
/// use convlog_testing::JournalBuilder;
///
/// let journal = JournalBuilder::new()
///     .session("s1", "/work")
///     .user("hi")
///     .assistant_text("hello")
///     .build();
/// assert_eq!(journal.lines().count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JournalBuilder {
    lines: Vec<String>,
}

impl JournalBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(self, id: &str, cwd: &str) -> Self {
        self.entry(json!({
            "type": "session",
            "version": 3,
            "id": id,
            "timestamp": "2026-03-01T10:00:00.000Z",
            "cwd": cwd
        }))
    }

    pub fn user(self, text: &str) -> Self {
        self.message(json!({"role": "user", "content": [{"type": "text", "text": text}]}))
    }

    pub fn assistant_text(self, text: &str) -> Self {
        self.message(json!({
            "role": "assistant",
            "content": [{"type": "text", "text": text}],
            "model": "claude-sonnet",
            "stopReason": "stop"
        }))
    }

    pub fn thinking(self, thought: &str, text: &str) -> Self {
        self.message(json!({
            "role": "assistant",
            "content": [
                {"type": "thinking", "thinking": thought},
                {"type": "text", "text": text}
            ]
        }))
    }

    pub fn tool_call(self, id: &str, name: &str, arguments: Value) -> Self {
        self.message(json!({
            "role": "assistant",
            "content": [{"type": "toolCall", "id": id, "name": name, "arguments": arguments}],
            "stopReason": "toolUse"
        }))
    }

    pub fn tool_result(self, id: &str, text: &str, is_error: bool) -> Self {
        self.message(json!({
            "role": "toolResult",
            "toolCallId": id,
            "content": [{"type": "text", "text": text}],
            "isError": is_error
        }))
    }

    /// Assistant message carrying token usage and cost.
    pub fn usage(self, input: u64, output: u64, cost: f64) -> Self {
        self.message(json!({
            "role": "assistant",
            "content": [],
            "usage": {
                "input": input,
                "output": output,
                "cacheRead": 0,
                "cacheWrite": 0,
                "totalTokens": input + output,
                "cost": {"total": cost}
            }
        }))
    }

    pub fn message(self, message: Value) -> Self {
        self.entry(json!({"type": "message", "message": message}))
    }

    pub fn entry(self, entry: Value) -> Self {
        self.raw(&entry.to_string())
    }

    /// A line written verbatim, e.g. a truncated record.
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
