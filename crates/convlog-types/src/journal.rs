//! Raw session journal records.
//!
//! The runtime writes one JSON object per line. Only the shapes consumed by
//! turn reconstruction are modelled; everything else collapses into
//! [`JournalEntry::Unknown`] so a journal never fails to load because of a
//! record type that appeared after this code was written.
//!
//! Optional fields are read leniently: a value of the wrong type reads as
//! absent instead of rejecting the record that carries it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `Some` when the value has the expected type, `None` otherwise.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Token counters: whole non-negative numbers, including ones written as
/// floats (`12.0`).
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        }),
        _ => None,
    };
    Ok(count)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "camelCase")]
pub enum JournalEntry {
    Session(SessionHeader),
    Message(MessageEntry),
    #[serde(other)]
    Unknown,
}

impl JournalEntry {
    /// Interpret an already-parsed JSON line.
    ///
    /// Any value that does not match a known record shape (including
    /// non-object lines) becomes `Unknown` rather than an error.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or(JournalEntry::Unknown)
    }

    pub fn as_message(&self) -> Option<&MessageEntry> {
        match self {
            JournalEntry::Message(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn as_session_header(&self) -> Option<&SessionHeader> {
        match self {
            JournalEntry::Session(header) => Some(header),
            _ => None,
        }
    }
}

/// First record of a journal, written when the runtime opens the session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHeader {
    #[serde(default, deserialize_with = "lenient")]
    pub cwd: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<Timestamp>,
    pub message: Message,
    /// Some runtime revisions place tool result content beside `message`
    /// instead of inside it.
    #[serde(default)]
    pub content: Option<Content>,
}

impl MessageEntry {
    /// Entry timestamp, falling back to the one carried by the message.
    pub fn effective_timestamp(&self) -> Option<&Timestamp> {
        self.timestamp.as_ref().or_else(|| self.message.timestamp())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "role")]
pub enum Message {
    #[serde(rename = "user")]
    User(UserMessage),
    #[serde(rename = "assistant")]
    Assistant(AssistantMessage),
    #[serde(rename = "toolResult")]
    ToolResult(ToolResultMessage),
    #[serde(other)]
    Other,
}

impl Message {
    pub fn timestamp(&self) -> Option<&Timestamp> {
        match self {
            Message::User(m) => m.timestamp.as_ref(),
            Message::Assistant(m) => m.timestamp.as_ref(),
            Message::ToolResult(m) => m.timestamp.as_ref(),
            Message::Other => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMessage {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub stop_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub usage: Option<UsageRecord>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResultMessage {
    #[serde(default, deserialize_with = "lenient")]
    pub tool_call_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub tool_use_id: Option<String>,
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_error: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<Timestamp>,
}

impl ToolResultMessage {
    /// The call id this result resolves; `toolCallId` wins over `toolUseId`.
    pub fn call_id(&self) -> Option<&str> {
        self.tool_call_id
            .as_deref()
            .or(self.tool_use_id.as_deref())
    }
}

/// Message content is either a bare string or an ordered list of blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    PlainText(String),
    Blocks(Vec<ContentBlock>),
    /// Any other JSON shape. Carries no text.
    Other(Value),
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let content = match Value::deserialize(deserializer)? {
            Value::String(text) => Content::PlainText(text),
            // Each block is read on its own; one bad element only loses itself.
            Value::Array(items) => {
                Content::Blocks(items.into_iter().map(ContentBlock::from_value).collect())
            }
            other => Content::Other(other),
        };
        Ok(content)
    }
}

impl Content {
    pub fn blocks(&self) -> &[ContentBlock] {
        match self {
            Content::Blocks(blocks) => blocks,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text {
        #[serde(default, deserialize_with = "lenient")]
        text: Option<String>,
    },
    #[serde(rename = "thinking")]
    Thinking {
        #[serde(default, deserialize_with = "lenient")]
        thinking: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        text: Option<String>,
    },
    #[serde(rename = "toolCall", alias = "tool_use")]
    ToolCall(ToolCallBlock),
    #[serde(other)]
    Unknown,
}

impl ContentBlock {
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or(ContentBlock::Unknown)
    }
}

/// Tool invocation request with its argument key already normalised.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawToolCallBlock")]
pub struct ToolCallBlock {
    pub id: Option<String>,
    pub name: String,
    pub input: Value,
}

#[derive(Deserialize)]
struct RawToolCallBlock {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<Value>,
    #[serde(default)]
    input: Option<Value>,
    #[serde(default)]
    parameters: Option<Value>,
}

impl From<RawToolCallBlock> for ToolCallBlock {
    fn from(raw: RawToolCallBlock) -> Self {
        let input = raw
            .arguments
            .or(raw.input)
            .or(raw.parameters)
            .unwrap_or_else(|| Value::Object(Default::default()));

        ToolCallBlock {
            id: raw.id,
            name: raw.name.unwrap_or_else(|| "unknown".to_string()),
            input,
        }
    }
}

/// Timestamps are passed through untouched: the runtime writes ISO strings on
/// entries and epoch milliseconds on messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Text(String),
    Number(serde_json::Number),
}

/// Per-message usage as reported by the runtime. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    #[serde(default, deserialize_with = "lenient_count")]
    pub input: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub output: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub cache_read: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub cache_write: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub cost: Option<CostRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub input: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub output: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub cache_read: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub cache_write: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<f64>,
}
