use crate::types::{LogLevel, ModeArg};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "convlog")]
#[command(about = "Extract conversation turns from OpenClaw session journals", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Runtime state directory [default: $OPENCLAW_STATE_DIR or ~/.openclaw]
    #[arg(long, global = true)]
    pub state_dir: Option<String>,

    /// Where conversation logs are written [default: $CONVLOG_OUTPUT_DIR,
    /// then convlog.toml, then <state-dir>/logs/conversations]
    #[arg(long, global = true)]
    pub output_dir: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Handle a lifecycle event (JSON on stdin or from --event)")]
    Hook {
        /// Read the event from a file instead of stdin
        #[arg(long)]
        event: Option<PathBuf>,
    },

    #[command(about = "Extract one session now")]
    Extract {
        #[arg(long)]
        agent: String,

        #[arg(long)]
        session: String,

        /// Session routing key, used to derive the channel
        #[arg(long)]
        session_key: Option<String>,

        #[arg(long)]
        mode: Option<ModeArg>,

        /// Also write the untruncated document to <session>.raw.log
        #[arg(long)]
        verbose: bool,
    },

    #[command(about = "Print the highest turn index already written for a session (-1 if none)")]
    LastIndex {
        #[arg(long)]
        agent: String,

        #[arg(long)]
        session: String,
    },
}
