//! Which turns of a session are already in its `.jsonl` file.
//!
//! The output file is the only state kept between runs. Every run rescans
//! it; nothing is cached in memory.

use convlog_types::TURN_SCHEMA;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
struct WrittenTurn {
    schema: String,
    session: WrittenSession,
    turn: WrittenIndex,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WrittenSession {
    session_id: String,
}

#[derive(Deserialize)]
struct WrittenIndex {
    index: usize,
}

/// Highest turn index already written for `session_id`, or `None` when the
/// file is missing, unreadable, or holds no turn record for that session.
pub async fn last_written_index(path: &Path, session_id: &str) -> Option<usize> {
    let text = tokio::fs::read_to_string(path).await.ok()?;
    last_index_in(&text, session_id)
}

/// Scan JSONL text for turn records of `session_id`. Lines that do not parse
/// or carry another schema (session-start markers, stray output) are skipped.
pub fn last_index_in(text: &str, session_id: &str) -> Option<usize> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str::<WrittenTurn>(line).ok())
        .filter(|record| record.schema == TURN_SCHEMA && record.session.session_id == session_id)
        .map(|record| record.turn.index)
        .max()
}
