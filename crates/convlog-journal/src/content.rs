use convlog_types::{Content, ContentBlock};

/// Concatenated plain text of a content value.
///
/// A bare string is returned as is; for a block list only `text` blocks
/// contribute, in order. Anything else has no text.
pub fn extract_text(content: Option<&Content>) -> String {
    match content {
        None => String::new(),
        Some(Content::PlainText(text)) => text.clone(),
        Some(Content::Blocks(blocks)) => blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_deref().unwrap_or_default()),
                _ => None,
            })
            .collect(),
        Some(Content::Other(_)) => String::new(),
    }
}

/// Reasoning text of a `thinking` block; `thinking` wins over `text`.
pub fn thinking_text(block: &ContentBlock) -> Option<&str> {
    match block {
        ContentBlock::Thinking { thinking, text } => thinking.as_deref().or(text.as_deref()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(value: serde_json::Value) -> Content {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_text_shapes() {
        assert_eq!(extract_text(None), "");
        assert_eq!(extract_text(Some(&content(json!("plain")))), "plain");
        assert_eq!(extract_text(Some(&content(json!({"weird": true})))), "");
        assert_eq!(extract_text(Some(&content(json!(17)))), "");
    }

    #[test]
    fn test_extract_text_concatenates_text_blocks_only() {
        let blocks = content(json!([
            {"type": "text", "text": "Hello, "},
            {"type": "thinking", "thinking": "ignored"},
            {"type": "text"},
            {"type": "toolCall", "id": "t1", "name": "read"},
            {"type": "text", "text": "world"}
        ]));
        assert_eq!(extract_text(Some(&blocks)), "Hello, world");
    }

    #[test]
    fn test_thinking_text_fallback() {
        let block: ContentBlock =
            serde_json::from_value(json!({"type": "thinking", "text": "via text"})).unwrap();
        assert_eq!(thinking_text(&block), Some("via text"));

        let block: ContentBlock =
            serde_json::from_value(json!({"type": "text", "text": "x"})).unwrap();
        assert_eq!(thinking_text(&block), None);
    }
}
