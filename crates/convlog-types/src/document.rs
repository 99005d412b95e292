//! Output documents written by the assemblers.

use serde::{Deserialize, Serialize};

use crate::{SessionMeta, Timestamp, Turn, TurnUsage};

pub const CONVERSATION_SCHEMA: &str = "openclaw-conversation-v1";
pub const TURN_SCHEMA: &str = "openclaw-turn-v1";
pub const SESSION_START_SCHEMA: &str = "openclaw-session-start-v1";

/// Whole-session document, generic over the per-turn representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDocument<T> {
    pub schema: String,
    pub extracted_at: String,
    pub session: SessionMeta,
    pub stats: ConversationStats,
    pub turns: Vec<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStats {
    /// Parsed journal lines, recognised or not.
    pub total_entries: usize,
    pub turns: usize,
    pub tool_call_count: usize,
    pub thinking_turn_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}

/// Size-bounded turn for forwarding to remote collectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactTurn {
    pub index: usize,
    pub timestamp: Option<Timestamp>,
    pub user_message: String,
    pub thinking: Option<String>,
    pub tool_calls: Vec<CompactToolCall>,
    pub response: String,
    pub model: Option<String>,
    pub stop_reason: Option<String>,
    pub usage: Option<TurnUsage>,
}

/// Tool call reduced to its shape: argument keys and short previews only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactToolCall {
    pub name: String,
    pub input_keys: Vec<String>,
    pub input_preview: String,
    pub result_preview: Option<String>,
    pub is_error: Option<bool>,
}

/// One line of the incremental `.jsonl` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnDocument {
    pub schema: String,
    pub extracted_at: String,
    pub session: SessionMeta,
    pub turn: Turn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartDocument {
    pub schema: String,
    pub extracted_at: String,
    pub session: SessionStartInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartInfo {
    pub agent_id: String,
    pub session_id: String,
    pub cwd: Option<String>,
}

impl SessionStartDocument {
    pub fn new(session: &SessionMeta, extracted_at: impl Into<String>) -> Self {
        Self {
            schema: SESSION_START_SCHEMA.to_string(),
            extracted_at: extracted_at.into(),
            session: SessionStartInfo {
                agent_id: session.agent_id.clone(),
                session_id: session.session_id.clone(),
                cwd: session.cwd.clone(),
            },
        }
    }
}
