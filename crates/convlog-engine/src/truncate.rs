use serde::{Deserialize, Serialize};

/// Character budgets for the optimized payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncationBudget {
    /// User message and response.
    pub text: usize,
    pub thinking: usize,
    /// JSON preview of a tool call's input.
    pub tool_input: usize,
    pub tool_result: usize,
}

impl Default for TruncationBudget {
    fn default() -> Self {
        Self {
            text: 600,
            thinking: 400,
            tool_input: 200,
            tool_result: 300,
        }
    }
}

/// Keep the first `budget` characters and note how many were cut:
/// `"<kept>… [+<n>]"`. Strings within budget come back unchanged.
pub fn truncate(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        None => text.to_string(),
        Some((cut, _)) => {
            let omitted = text[cut..].chars().count();
            format!("{}… [+{}]", &text[..cut], omitted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_within_budget_is_identity() {
        assert_eq!(truncate("short", 80), "short");
        assert_eq!(truncate("exact", 5), "exact");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_truncate_reports_omitted_count() {
        assert_eq!(truncate("abcdefghij", 4), "abcd… [+6]");
        assert_eq!(truncate("abc", 0), "… [+3]");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "héllo wörld ✓✓✓";
        let out = truncate(text, 5);
        assert_eq!(out, "héllo… [+10]");
        assert!(out.starts_with(&text.chars().take(5).collect::<String>()));
    }
}
