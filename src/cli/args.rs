//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::InputFormat;

/// Rebuild spreadsheet outlines as trees and serialize them into nested menu JSON
#[derive(Parser, Debug)]
#[command(name = "menutree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .menutree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an outline grid into menu JSON
    Build {
        /// Grid file (JSON or CSV); stdin when omitted or "-"
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,

        /// Input format
        #[arg(short, long, value_enum)]
        format: Option<InputFormat>,

        /// Write JSON to this file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Pretty-print JSON
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON
        #[arg(long)]
        compact: bool,

        /// Envelope key wrapping the document
        #[arg(long, conflicts_with = "raw")]
        envelope: Option<String>,

        /// Emit the bare menu without envelope
        #[arg(long)]
        raw: bool,
    },

    /// Show the outline as a tree
    Tree {
        /// Grid file (JSON or CSV); stdin when omitted or "-"
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,

        /// Input format
        #[arg(short, long, value_enum)]
        format: Option<InputFormat>,
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
    /// Print effective settings as TOML
    Show,
    /// Print config file locations
    Path,
}
