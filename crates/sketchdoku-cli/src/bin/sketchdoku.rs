//! The `sketchdoku` command.

use std::process::ExitCode;

use clap::Parser as _;
use sketchdoku_cli::{Cli, commands, version};

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("sketchdoku {}", version::build_version());
    log::debug!("{cli:?}");

    match commands::run(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
