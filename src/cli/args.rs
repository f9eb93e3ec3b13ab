//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Find a root-to-leaf path through a number pyramid whose product equals a target
#[derive(Parser, Debug)]
#[command(name = "pyrpath")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug verbosity, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding the local .pyrpath.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the winning turn sequence (L/R) or "No Solution"
    Solve {
        /// Problem file: target line, then comma-separated rows (stdin if omitted)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print the search trace
    Trace {
        /// Problem file (stdin if omitted)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Emit found flag, path and trace as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay the search trace step by step
    Replay {
        /// Problem file (stdin if omitted)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Override pause per node step in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Show the pyramid as tree
    Tree {
        /// Problem file (stdin if omitted)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// List every root-to-leaf path with its product
    Branches {
        /// Problem file (stdin if omitted)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print drawing connections as x1,y1,x2,y2
    Edges {
        /// Problem file (stdin if omitted)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Only the connections of the winning path
        #[arg(long)]
        path: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show global config file path
    Path,
}
