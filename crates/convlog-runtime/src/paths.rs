use crate::Result;
use convlog_engine::OutputMode;
use convlog_journal::validate_id;
use std::path::{Path, PathBuf};

/// Output files for one session: `<output_dir>/<agent_id>/<session_id>.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    dir: PathBuf,
    session_id: String,
}

impl OutputPaths {
    pub fn new(output_dir: &Path, agent_id: &str, session_id: &str) -> Result<Self> {
        validate_id(agent_id)?;
        validate_id(session_id)?;

        Ok(Self {
            dir: output_dir.join(agent_id),
            session_id: session_id.to_string(),
        })
    }

    /// Separator-delimited documents from the full and optimized modes.
    pub fn conversation_log(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.session_id))
    }

    /// One JSON line per record: turns and session-start markers.
    pub fn turn_log(&self) -> PathBuf {
        self.dir.join(format!("{}.jsonl", self.session_id))
    }

    /// Untruncated companion written alongside the other modes when verbose.
    pub fn raw_log(&self) -> PathBuf {
        self.dir.join(format!("{}.raw.log", self.session_id))
    }

    pub fn for_mode(&self, mode: OutputMode) -> PathBuf {
        match mode {
            OutputMode::Full | OutputMode::Optimized => self.conversation_log(),
            OutputMode::Incremental => self.turn_log(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_per_mode() {
        let paths = OutputPaths::new(Path::new("/out"), "main", "s1").unwrap();
        assert_eq!(paths.for_mode(OutputMode::Full), PathBuf::from("/out/main/s1.log"));
        assert_eq!(paths.for_mode(OutputMode::Optimized), PathBuf::from("/out/main/s1.log"));
        assert_eq!(
            paths.for_mode(OutputMode::Incremental),
            PathBuf::from("/out/main/s1.jsonl")
        );
        assert_eq!(paths.raw_log(), PathBuf::from("/out/main/s1.raw.log"));
    }

    #[test]
    fn test_rejects_path_components() {
        assert!(OutputPaths::new(Path::new("/out"), "../etc", "s1").is_err());
        assert!(OutputPaths::new(Path::new("/out"), "main", "a/b").is_err());
    }
}
