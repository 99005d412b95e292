// Engine - turn reconstruction and output assembly.
// Sits between parsed journal entries (types/journal) and the runtime that writes files.

pub mod payload;
pub mod session;
pub mod stats;
pub mod truncate;

pub use payload::{
    AssemblyInput, FullAssembler, IncrementalAssembler, Layout, OptimizedAssembler, OutputMode,
    Payload, PayloadAssembler, assembler_for,
};
pub use session::{TurnBuilder, TurnReconstructor, merge_usage};
pub use stats::conversation_stats;
pub use truncate::{TruncationBudget, truncate};

use convlog_types::{JournalEntry, Turn};

// Façade API - stable interface for the runtime layer

/// Rebuild every turn of a journal in one pass.
pub fn build_turns(entries: &[JournalEntry]) -> Vec<Turn> {
    let mut reconstructor = TurnReconstructor::new();
    for entry in entries {
        reconstructor.push(entry);
    }
    reconstructor.finish()
}
