//! Implementation of the `stencil completions` command.

use clap::CommandFactory;
use clap_complete::generate;

use crate::{
    cli::{Cli, CompletionsArgs, Shell},
    error::CliResult,
};

/// Execute the `stencil completions` command: write a completion script
/// for the requested shell to stdout.
pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut cmd = Cli::command();
    let mut stdout = std::io::stdout();

    match args.shell {
        Shell::Bash => generate(clap_complete::shells::Bash, &mut cmd, "stencil", &mut stdout),
        Shell::Zsh => generate(clap_complete::shells::Zsh, &mut cmd, "stencil", &mut stdout),
        Shell::Fish => generate(clap_complete::shells::Fish, &mut cmd, "stencil", &mut stdout),
        Shell::PowerShell => generate(
            clap_complete::shells::PowerShell,
            &mut cmd,
            "stencil",
            &mut stdout,
        ),
        Shell::Elvish => generate(
            clap_complete::shells::Elvish,
            &mut cmd,
            "stencil",
            &mut stdout,
        ),
    }
    Ok(())
}
