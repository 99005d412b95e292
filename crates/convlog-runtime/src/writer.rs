//! Append-only log writer.

use crate::Result;
use convlog_engine::{Layout, Payload};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Text appended for one payload.
///
/// Block payloads get a separator line, `===== <schema> <extractedAt> =====`,
/// then the pretty-printed document. Line payloads are a single compact JSON
/// line. Both end with a newline.
pub fn render(payload: &Payload) -> Result<String> {
    let text = match payload.layout() {
        Layout::Block => format!(
            "===== {} {} =====\n{}\n",
            payload.schema(),
            payload.extracted_at(),
            serde_json::to_string_pretty(payload)?
        ),
        Layout::Line => format!("{}\n", serde_json::to_string(payload)?),
    };
    Ok(text)
}

/// Append payloads to `path`, creating the file and its parent directories
/// as needed. Existing content is never rewritten; all payloads go out in a
/// single write.
pub async fn append_payloads(path: &Path, payloads: &[Payload]) -> Result<()> {
    if payloads.is_empty() {
        return Ok(());
    }

    let mut buffer = String::new();
    for payload in payloads {
        buffer.push_str(&render(payload)?);
    }

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(buffer.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use convlog_types::{
        CONVERSATION_SCHEMA, ConversationDocument, ConversationStats, SessionMeta,
        SessionStartDocument, TURN_SCHEMA, Turn, TurnDocument,
    };

    fn turn_payload(index: usize) -> Payload {
        Payload::Turn(TurnDocument {
            schema: TURN_SCHEMA.to_string(),
            extracted_at: "2026-03-01T00:00:00Z".to_string(),
            session: SessionMeta::new("main", "s1", None, None),
            turn: Turn {
                index,
                user_message: format!("message {index}"),
                ..Default::default()
            },
        })
    }

    #[test]
    fn test_line_layout() {
        let text = render(&turn_payload(0)).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["turn"]["userMessage"], "message 0");
    }

    #[test]
    fn test_block_layout_has_separator() {
        let payload = Payload::Conversation(ConversationDocument {
            schema: CONVERSATION_SCHEMA.to_string(),
            extracted_at: "2026-03-01T00:00:00Z".to_string(),
            session: SessionMeta::new("main", "s1", None, None),
            stats: ConversationStats::default(),
            turns: Vec::new(),
        });
        let text = render(&payload).unwrap();

        let (separator, body) = text.split_once('\n').unwrap();
        assert_eq!(
            separator,
            "===== openclaw-conversation-v1 2026-03-01T00:00:00Z ====="
        );
        assert!(body.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(value["schema"], CONVERSATION_SCHEMA);
    }

    #[test]
    fn test_session_start_is_a_line() {
        let payload = Payload::SessionStart(SessionStartDocument::new(
            &SessionMeta::new("main", "s1", None, Some("/w".to_string())),
            "2026-03-01T00:00:00Z",
        ));
        let text = render(&payload).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(!text.starts_with("====="));
    }

    #[tokio::test]
    async fn test_append_preserves_existing_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("main").join("s1.jsonl");

        append_payloads(&path, &[turn_payload(0)]).await.unwrap();
        append_payloads(&path, &[turn_payload(1), turn_payload(2)]).await.unwrap();
        append_payloads(&path, &[]).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let indices: Vec<u64> = text
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
            .map(|value| value["turn"]["index"].as_u64().unwrap())
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
