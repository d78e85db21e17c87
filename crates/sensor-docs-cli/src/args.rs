use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sensor-docs")]
#[command(about = "Regenerate the sensor list and repository tree in a README")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Repository root to scan
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Config file (default: <root>/sensor-docs.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Block {
    /// The nested sensor list
    List,
    /// The fenced repository tree
    Tree,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Regenerate both README regions (default)
    Update {
        /// Print the updated document instead of writing it
        #[arg(short, long)]
        dry_run: bool,
    },

    /// Exit with an error if the README is out of date
    Check,

    /// Print one generated block to stdout
    Render {
        #[arg(value_enum)]
        block: Block,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// List all config values
    List,
    /// Show config file path
    Path,
    /// Initialize config file with default template
    Init,
    /// Print the effective config as TOML
    Show,
}
