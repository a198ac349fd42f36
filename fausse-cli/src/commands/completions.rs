//! Shell completion generation command.
//!
//! Writes the completion script to stdout and a short install hint to
//! stderr, so `fausse completions zsh > _fausse` captures only the script.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary
const BIN_NAME: &str = "fausse";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Where to put the script for `shell`, if we know.
fn install_hint(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some("fausse completions bash > ~/.local/share/bash-completion/completions/fausse"),
        Shell::Zsh => Some("fausse completions zsh > ~/.zsh/completions/_fausse  (must be on $fpath)"),
        Shell::Fish => Some("fausse completions fish > ~/.config/fish/completions/fausse.fish"),
        Shell::PowerShell => Some("fausse completions powershell | Out-String | Invoke-Expression"),
        _ => None,
    }
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            if let Some(hint) = install_hint(self.shell) {
                eprintln!("# Install with:");
                eprintln!("#   {hint}");
            }
        }

        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
