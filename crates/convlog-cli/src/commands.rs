use super::args::{Cli, Commands};
use super::handlers;
use crate::logging;
use anyhow::Result;
use convlog_runtime::Overrides;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let overrides = Overrides {
        state_dir: cli.state_dir,
        output_dir: cli.output_dir,
        ..Default::default()
    };

    match cli.command {
        Commands::Hook { event } => {
            runtime.block_on(handlers::hook::handle(overrides, event));
            Ok(())
        }

        Commands::Extract {
            agent,
            session,
            session_key,
            mode,
            verbose,
        } => {
            let overrides = Overrides {
                mode: mode.map(Into::into),
                verbose: verbose.then_some(true),
                ..overrides
            };
            runtime.block_on(handlers::extract::handle(
                overrides,
                agent,
                session,
                session_key,
            ))
        }

        Commands::LastIndex { agent, session } => {
            runtime.block_on(handlers::last_index::handle(overrides, &agent, &session))
        }
    }
}
