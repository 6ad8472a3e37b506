use crate::utils::config::OnConflict;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "soundpack")]
#[command(about = "Sound asset helpers: extension normalizing and sounds.json generation")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rename files with an uppercase extension to its lowercase form
    Normalize {
        /// Root directory to walk (defaults to the configured root, then ".")
        path: Option<String>,

        /// Extension to rename, matched case-sensitively (e.g. ".OGG")
        #[arg(short, long)]
        extension: Option<String>,

        /// What to do when the lowercase name already exists
        #[arg(long, value_enum)]
        on_conflict: Option<OnConflict>,
    },

    /// Generate a sounds.json manifest from a sound directory
    Manifest {
        /// Root directory to scan; prompts for everything when omitted
        path: Option<String>,

        /// Output file name, written inside the root directory
        #[arg(short, long)]
        output: Option<String>,

        /// Namespace (mod id) prefixed to every sound name
        #[arg(short, long)]
        namespace: Option<String>,

        /// Accepted extension, matched case-insensitively (repeatable)
        #[arg(short, long = "extension")]
        extensions: Vec<String>,

        /// Character used to join path segments in sound keys
        #[arg(long)]
        delimiter: Option<char>,

        /// Replace the output file if it already exists
        #[arg(long)]
        overwrite: bool,

        /// Print every entry as it is added
        #[arg(short, long)]
        verbose: bool,

        /// Prompt for every option even when a path is given
        #[arg(short, long)]
        interactive: bool,
    },
}
