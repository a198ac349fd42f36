//! Build script for fausse-cli.
//!
//! Renders the `fausse.1` man page into OUT_DIR with clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! tree is declared again here with the builder API.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("fausse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Cafe Fausse reservation server and admin tool")
        .long_about(
            "Runs the Cafe Fausse reservation and newsletter API, and offers the same \
             booking operations from the terminal",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("FAUSSE_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("FAUSSE_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("FAUSSE_DISABLE_AUTOINIT"),
        )
        .subcommands([
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about(
                    "Create the data directory, the database and optionally a commented config.yaml",
                ),
            Command::new("serve")
                .about("Run the HTTP API")
                .long_about("Serve the reservation, availability, newsletter and admin routes"),
            Command::new("reserve")
                .about("Book a table")
                .long_about("Validate a booking, check availability and store it atomically"),
            Command::new("availability")
                .about("Check whether a slot can take a party")
                .long_about("Print remaining capacity for one slot or every slot of a day"),
            Command::new("list")
                .about("List reservations")
                .long_about("Display stored reservations as a table, JSON, CSV or TSV"),
            Command::new("subscribe")
                .about("Subscribe an email to the newsletter")
                .long_about("Add an email to the newsletter list; existing entries are kept"),
            Command::new("seed")
                .about("Fill the coming days with demo reservations")
                .long_about("Book demo parties through the normal availability checks"),
            Command::new("seed-capacity")
                .about("Set up a full slot and an almost full slot")
                .long_about("Wipe reservations and fill two seatings for capacity testing"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a fausse configuration file for errors"),
            Command::new("show-data-dir")
                .about("Show the resolved data directory path")
                .long_about("Display the path to the fausse data directory"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer).unwrap();
    fs::write(man_dir.join("fausse.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
