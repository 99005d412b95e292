use convlog_types::{JournalEntry, SessionHeader};
use serde_json::Value;
use std::path::Path;

/// Load a session journal.
///
/// A missing or unreadable file yields an empty journal: sessions that have
/// not written anything yet are not an error.
pub async fn read_journal(path: &Path) -> Vec<JournalEntry> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => parse_journal(&text),
        Err(_) => Vec::new(),
    }
}

/// Parse journal text, one JSON value per line.
///
/// Blank lines and lines that are not valid JSON (typically a trailing line
/// still being written by the runtime) are skipped; order is preserved for
/// the rest.
pub fn parse_journal(text: &str) -> Vec<JournalEntry> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .map(JournalEntry::from_value)
        .collect()
}

/// The first `type: "session"` record, if the journal has one.
pub fn session_header(entries: &[JournalEntry]) -> Option<&SessionHeader> {
    entries.iter().find_map(JournalEntry::as_session_header)
}
