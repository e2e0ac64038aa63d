//! Core CLI definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "balcora")]
#[command(about = "Homeworld weapon editor - validate and export weapon scripts", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export a weapon configuration (JSON or YAML) as a Lua weapon script
    #[command(visible_alias = "e")]
    Emit {
        /// Path to the weapon configuration (.json, .yaml, .yml)
        input: PathBuf,

        /// Output directory (uses configured default, then the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File name stem (defaults to the weapon name)
        #[arg(long)]
        stem: Option<String>,

        /// Print the script instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Back up a hand-edited script before overwriting (uses configured default)
        #[arg(short, long)]
        backup: Option<bool>,

        /// Export even when validation reports errors
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a weapon configuration without exporting
    #[command(visible_alias = "k")]
    Check {
        /// Path to the weapon configuration (.json, .yaml, .yml)
        input: PathBuf,

        /// Only show errors
        #[arg(short, long)]
        quiet: bool,
    },

    /// List vocabularies (weapon types, families, ...) or the members of one
    #[command(visible_alias = "v")]
    Vocab {
        /// Vocabulary name, e.g. armour_family
        name: Option<String>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Set default file stem for unnamed weapons
        #[arg(long)]
        stem: Option<String>,

        /// Set whether hand-edited scripts are backed up
        #[arg(long)]
        backup: Option<bool>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
