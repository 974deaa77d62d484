//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names,
//! aliases, help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Template-driven project scaffolding",
    long_about = "Stencil materializes files and commands from declarative \
                  templates, prompting for whatever the template needs.",
    after_help = "EXAMPLES:\n\
        \x20 stencil make plugin\n\
        \x20 stencil make acme:blocks/editor --force\n\
        \x20 stencil list\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold from a registered template.
    #[command(
        visible_alias = "m",
        about = "Scaffold from a template",
        after_help = "EXAMPLES:\n\
            \x20 stencil make plugin\n\
            \x20 stencil make acme:blocks/editor\n\
            \x20 stencil make plugin --force --project-root ../app"
    )]
    Make(MakeArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 stencil list\n\
            \x20 stencil list --namespace acme"
    )]
    List(ListArgs),

    /// Initialise a project configuration file.
    #[command(
        about = "Initialise a project configuration",
        after_help = "EXAMPLES:\n\
            \x20 stencil init\n\
            \x20 stencil init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage project and global configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get vendor.name\n\
            \x20 stencil config set vendor.name acme\n\
            \x20 stencil config list"
    )]
    Config(ConfigCommands),
}

// ── make ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil make`.
#[derive(Debug, Args)]
pub struct MakeArgs {
    /// Template identifier: `relative/path` or `namespace:relative/path`.
    #[arg(value_name = "TEMPLATE", help = "Template to scaffold")]
    pub template: String,

    /// Overwrite existing files (destructive).
    #[arg(long = "force", help = "Overwrite existing files")]
    pub force: bool,

    /// Override the project root path.
    #[arg(
        long = "project-root",
        value_name = "DIR",
        help = "Path to consider the project root"
    )]
    pub project_root: Option<PathBuf>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show templates from this namespace.
    #[arg(short = 'n', long = "namespace", help = "Filter by namespace")]
    pub namespace: Option<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `vendor.name`.
        key: String,
        /// Address the global configuration instead of the project's.
        #[arg(long = "global")]
        global: bool,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value (parsed as JSON, falling back to a plain string).
        value: String,
        /// Address the global configuration instead of the project's.
        #[arg(long = "global")]
        global: bool,
    },
    /// Print all configuration values.
    List {
        /// Address the global configuration instead of the project's.
        #[arg(long = "global")]
        global: bool,
    },
    /// Print the path to the active configuration file.
    Path {
        /// Address the global configuration instead of the project's.
        #[arg(long = "global")]
        global: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_make_command() {
        let cli = Cli::parse_from(["stencil", "make", "acme:blocks/editor", "--force"]);
        match cli.command {
            Commands::Make(args) => {
                assert_eq!(args.template, "acme:blocks/editor");
                assert!(args.force);
                assert!(args.project_root.is_none());
            }
            other => panic!("expected Make, got {other:?}"),
        }
    }

    #[test]
    fn make_alias() {
        let cli = Cli::parse_from(["stencil", "m", "plugin"]);
        assert!(matches!(cli.command, Commands::Make(_)));
    }

    #[test]
    fn list_alias() {
        let cli = Cli::parse_from(["stencil", "ls"]);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn config_set_parses_key_and_value() {
        let cli = Cli::parse_from(["stencil", "config", "set", "vendor.name", "acme"]);
        match cli.command {
            Commands::Config(ConfigCommands::Set { key, value, global }) => {
                assert_eq!(key, "vendor.name");
                assert_eq!(value, "acme");
                assert!(!global);
            }
            other => panic!("expected Config Set, got {other:?}"),
        }
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["stencil", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
