pub mod config;
pub mod dedup;
pub mod error;
pub mod paths;
pub mod pipeline;
pub mod writer;

pub use config::{Config, Overrides, Settings};
pub use dedup::{last_index_in, last_written_index};
pub use error::{Error, Result};
pub use paths::OutputPaths;
pub use pipeline::{Outcome, Pipeline, SessionTarget, SkipReason};
pub use writer::{append_payloads, render};
