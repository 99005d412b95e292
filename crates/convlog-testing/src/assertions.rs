//! Readers and assertions for writer output.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Parse every non-blank line of a `.jsonl` output file.
pub fn read_jsonl(path: &Path) -> Result<Vec<Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    text.lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("Line {} is not JSON", i + 1))
        })
        .collect()
}

/// Split a `.log` file into `(separator, document)` pairs.
pub fn read_blocks(path: &Path) -> Result<Vec<(String, Value)>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut blocks: Vec<(String, String)> = Vec::new();
    for line in text.lines() {
        if line.starts_with("===== ") && line.ends_with(" =====") {
            blocks.push((line.to_string(), String::new()));
        } else if let Some((_, body)) = blocks.last_mut() {
            body.push_str(line);
            body.push('\n');
        } else if !line.trim().is_empty() {
            anyhow::bail!("Content before the first separator: {}", line);
        }
    }

    blocks
        .into_iter()
        .map(|(separator, body)| {
            let value = serde_json::from_str(&body)
                .with_context(|| format!("Block after '{}' is not JSON", separator))?;
            Ok((separator, value))
        })
        .collect()
}

/// `turn.index` of every turn record, in file order.
pub fn turn_indices(records: &[Value]) -> Vec<u64> {
    records
        .iter()
        .filter(|r| r["schema"] == "openclaw-turn-v1")
        .filter_map(|r| r["turn"]["index"].as_u64())
        .collect()
}

/// Assert that records carry the given schemas, in order.
pub fn assert_schemas(records: &[Value], expected: &[&str]) -> Result<()> {
    let schemas: Vec<&str> = records
        .iter()
        .map(|r| r["schema"].as_str().unwrap_or("<missing>"))
        .collect();

    if schemas != expected {
        anyhow::bail!("Expected schemas {:?}, got {:?}", expected, schemas);
    }

    Ok(())
}
