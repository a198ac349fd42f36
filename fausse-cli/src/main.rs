//! `fausse`: runs the Cafe Fausse reservation API and gives staff the same
//! operations at the terminal.

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = fausse::init_logger(cli.verbose, cli.quiet).install() {
        eprintln!("Warning: could not install logger: {e}");
    }

    let global = cli.global_options();
    if let Err(e) = cli.command.execute(&global) {
        log::debug!("command failed: {e:?}");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
