// Hook entry point and manual commands around the extraction pipeline.
//
// The runtime calls `convlog hook` on lifecycle events with the event JSON on
// stdin. That path must never fail the host: errors are logged and the
// process still exits 0. `extract` and `last-index` are for operators and do
// report failures through the exit status.

mod args;
mod commands;
mod handlers;
mod logging;
pub mod types;

pub use args::{Cli, Commands};
pub use commands::run;
