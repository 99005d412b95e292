use convlog_types::{ConversationStats, Turn};

/// Summary block of a conversation document.
///
/// `total_cost` is only present when at least one turn carried usage.
pub fn conversation_stats(turns: &[Turn], total_entries: usize) -> ConversationStats {
    let total_cost = turns
        .iter()
        .filter_map(Turn::total_cost)
        .fold(None, |sum: Option<f64>, cost| Some(sum.unwrap_or(0.0) + cost));

    ConversationStats {
        total_entries,
        turns: turns.len(),
        tool_call_count: turns.iter().map(|t| t.tool_calls.len()).sum(),
        thinking_turn_count: turns.iter().filter(|t| t.has_thinking()).count(),
        total_cost,
    }
}
