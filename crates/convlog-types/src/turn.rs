use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Timestamp;

/// One user message plus everything the assistant did in response, up to the
/// next user message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    /// Position among the turns of the current journal contents.
    pub index: usize,
    pub timestamp: Option<Timestamp>,
    pub user_message: String,
    pub thinking: Option<String>,
    pub tool_calls: Vec<ToolCall>,
    pub response: String,
    pub model: Option<String>,
    pub stop_reason: Option<String>,
    pub usage: Option<TurnUsage>,
}

impl Turn {
    pub fn has_thinking(&self) -> bool {
        self.thinking.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn total_cost(&self) -> Option<f64> {
        self.usage.as_ref().map(|u| u.cost.total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCall {
    pub id: Option<String>,
    pub name: String,
    pub input: Value,
    /// `None` until a matching tool result arrives.
    pub result: Option<String>,
    pub is_error: Option<bool>,
}

impl ToolCall {
    pub fn is_resolved(&self) -> bool {
        self.is_error.is_some()
    }
}

/// Usage summed across every assistant message of a turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnUsage {
    pub input: u64,
    pub output: u64,
    pub cache_read: u64,
    pub cache_write: u64,
    pub total_tokens: u64,
    pub cost: TurnCost,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnCost {
    pub input: f64,
    pub output: f64,
    pub cache_read: f64,
    pub cache_write: f64,
    pub total: f64,
}
