use convlog_journal::{read_journal, session_header};
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_missing_journal_is_empty() {
    let dir = TempDir::new().unwrap();
    let entries = read_journal(&dir.path().join("nope.jsonl")).await;
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_directory_instead_of_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let entries = read_journal(dir.path()).await;
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_reads_partial_trailing_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s.jsonl");
    fs::write(
        &path,
        concat!(
            "{\"type\":\"session\",\"id\":\"s\",\"cwd\":\"/w\"}\n",
            "{\"type\":\"message\",\"message\":{\"role\":\"user\",\"content\":\"one\"}}\n",
            "{\"type\":\"message\",\"message\":{\"role\":\"user\",\"cont",
        ),
    )
    .unwrap();

    let entries = read_journal(&path).await;
    assert_eq!(entries.len(), 2);
    assert_eq!(
        session_header(&entries).and_then(|h| h.cwd.as_deref()),
        Some("/w")
    );
}
