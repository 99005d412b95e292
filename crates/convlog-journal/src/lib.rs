// Error types
pub mod error;

// Journal loading
pub mod reader;

// Content text extraction
pub mod content;

// Journal location
pub mod path;

pub use content::{extract_text, thinking_text};
pub use error::{Error, Result};
pub use path::{journal_path, validate_id};
pub use reader::{parse_journal, read_journal, session_header};
