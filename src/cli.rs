use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::session::EditConfig;
use crate::tag::{CommitMode, Field};

#[derive(Parser)]
#[command(name = "mp3tagger")]
#[command(version = "0.1.0")]
#[command(about = "View and edit the ID3v2.3 tag frames of an MP3 file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Emit one JSON object per event instead of text
    #[arg(long, default_value_t = false, global = true)]
    pub json: bool,

    /// Only print errors and the values that were asked for
    #[arg(long, short = 'q', default_value_t = false, global = true)]
    pub quiet: bool,

    /// Print debug details (header bytes, frame sizes, staged paths)
    #[arg(long, short = 'v', default_value_t = false, global = true)]
    pub verbose: bool,

    /// Append failures to dated JSON files under this directory
    #[arg(long = "error-log", value_name = "DIR", global = true)]
    pub error_log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show title, artist, album, year, genre and comment
    View {
        /// MP3 file to read
        path: PathBuf,
    },
    /// Replace one field and write the file back
    Edit {
        /// Field to change (t, a, A, y, m, c are accepted too)
        #[arg(value_enum)]
        field: Field,
        /// New text for the field
        text: String,
        /// MP3 file to modify
        path: PathBuf,
        /// How the rewritten copy replaces the original
        #[arg(long, value_enum, default_value_t = CommitMode::Rename)]
        commit: CommitMode,
        /// Directory for the staged Modified.mp3 in copy-back mode
        #[arg(long = "staging-dir", value_name = "DIR", default_value = ".")]
        staging_dir: PathBuf,
    },
    /// List or clear failures recorded under --error-log
    Errors {
        /// Only this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Delete the selected entries instead of listing them
        #[arg(long, default_value_t = false)]
        clear: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Output settings derived from the global flags
#[derive(Clone, Debug)]
pub struct HeadlessConfig {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: OutputFormat,
}

impl HeadlessConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            quiet: cli.quiet,
            verbose: cli.verbose && !cli.quiet,
            output_format: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        }
    }
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            verbose: false,
            output_format: OutputFormat::Text,
        }
    }
}

impl EditConfig {
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        match &cli.command {
            Commands::Edit {
                commit,
                staging_dir,
                ..
            } => Some(Self {
                commit: *commit,
                staging_dir: staging_dir.clone(),
            }),
            Commands::View { .. } | Commands::Errors { .. } => None,
        }
    }
}
