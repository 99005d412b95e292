use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Location of a session journal under the runtime's state directory:
/// `<state_dir>/agents/<agent_id>/sessions/<session_id>.jsonl`.
pub fn journal_path(state_dir: &Path, agent_id: &str, session_id: &str) -> Result<PathBuf> {
    validate_id(agent_id)?;
    validate_id(session_id)?;

    Ok(state_dir
        .join("agents")
        .join(agent_id)
        .join("sessions")
        .join(format!("{}.jsonl", session_id)))
}

/// Ids come from event payloads and end up as path components, so they must
/// not be able to escape the directory they are joined onto.
pub fn validate_id(id: &str) -> Result<()> {
    let invalid = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '\0']);

    if invalid {
        Err(Error::InvalidId(id.to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_path() {
        let path = journal_path(Path::new("/home/u/.openclaw"), "main", "abc-123").unwrap();
        assert_eq!(
            path,
            PathBuf::from("/home/u/.openclaw/agents/main/sessions/abc-123.jsonl")
        );
    }

    #[test]
    fn test_rejects_traversal() {
        assert!(journal_path(Path::new("/s"), "..", "abc").is_err());
        assert!(journal_path(Path::new("/s"), "main", "../../etc/passwd").is_err());
        assert!(journal_path(Path::new("/s"), "main", "").is_err());
        assert!(validate_id("a\\b").is_err());
        assert!(validate_id("session.v2").is_ok());
    }
}
