//! Testing infrastructure for convlog integration tests.
//!
//! - `TestWorld`: isolated state and output directories, CLI execution
//! - `fixtures`: journal builder for synthetic sessions
//! - `assertions`: readers for the files the writer produces

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::JournalBuilder;
pub use world::{CliResult, TestWorld};
