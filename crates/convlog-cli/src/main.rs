use clap::Parser;
use convlog::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    // `last-index` output is meant for pipes; a closed reader should end the
    // process quietly instead of panicking inside println!.
    #[cfg(unix)]
    reset_sigpipe();

    let cli = Cli::parse();

    // `hook` swallows its own failures, so only the operator commands reach
    // this branch with an error.
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("convlog: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
