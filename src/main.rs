use clap::Parser;
use std::process::ExitCode;
use treecat::{Cli, Output};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::new(false, quiet).error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
