//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// unitclosure - Load the full dependency closure of code units
#[derive(Parser, Debug)]
#[command(name = "unitclosure")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load every unit in a directory and the closure of their references
    #[command(
        name = "load",
        long_about = "Load every unit in a directory and the closure of their references.\n\n\
            Unit files found directly in the directory are preloaded first. Then the \
            references of every loaded unit are followed, depth-first, until nothing \
            new remains. Framework units (System.*, Microsoft.*, ...) are excluded \
            unless --include-framework is given.\n\n\
            A unit file that fails to preload is reported and skipped. A reference \
            that cannot be loaded aborts the whole command.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Load the units next to the unitclosure binary
    unitclosure load

    # Load units from an application directory
    unitclosure load --dir ./app

    # Also search a shared directory when resolving references
    unitclosure load --dir ./app --probe /opt/shared/units

    # Start from a unit that lives elsewhere
    unitclosure load --dir ./app --preload ./plugins/Reports.unit

    # Machine-readable report
    unitclosure load --dir ./app --json"
    )]
    Load(LoadArgs),

    /// Classify unit identities as framework or application
    #[command(
        name = "classify",
        after_help = "\
WORKFLOW EXAMPLES:
    unitclosure classify System.Core App \"Lib, Version=1.0.0\"

    # Include framework rules from a directory config
    unitclosure classify --dir ./app Vendor.Widgets"
    )]
    Classify {
        /// Identities to classify
        #[arg(required = true)]
        identities: Vec<String>,

        /// Directory whose unitclosure.toml adds framework rules
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show effective configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    unitclosure completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    unitclosure completion zsh >> ~/.zshrc

    # Fish
    unitclosure completion fish > ~/.config/fish/completions/unitclosure.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `load`.
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Directory to scan for unit files (defaults to the program's directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Load and walk framework units too
    #[arg(long, conflicts_with = "exclude_framework")]
    pub include_framework: bool,

    /// Exclude framework units even if configuration includes them
    #[arg(long)]
    pub exclude_framework: bool,

    /// Extension of unit files (without the dot)
    #[arg(long)]
    pub extension: Option<String>,

    /// Extra directory searched when resolving references (repeatable)
    #[arg(long = "probe", value_name = "DIR")]
    pub probe: Vec<PathBuf>,

    /// Unit file loaded before the closure computation starts (repeatable)
    #[arg(long = "preload", value_name = "FILE")]
    pub preload: Vec<PathBuf>,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl LoadArgs {
    /// Framework inclusion requested on the command line, if any.
    ///
    /// Returns `Some(true)` for `--include-framework`, `Some(false)` for
    /// `--exclude-framework`, `None` if neither was given.
    pub fn include_framework_flag(&self) -> Option<bool> {
        if self.include_framework {
            Some(true)
        } else if self.exclude_framework {
            Some(false)
        } else {
            None
        }
    }
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the effective configuration and where it came from
    Show {
        /// Unit directory whose unitclosure.toml is included
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
