pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::vocabulary::{DEFAULT_SAMPLE_SIZE, DEFAULT_UNTRAINED_BATCH};

#[derive(Parser)]
#[command(name = "lector")]
#[command(about = "Lesson content and vocabulary core for a voice English tutor", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/lector/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and print today's lesson text
    Lesson {
        /// Print only which source won
        #[arg(long)]
        source_only: bool,
    },
    /// Print the full tutor instructions for a new session
    Brief,
    /// Vocabulary operations
    Words {
        #[command(subcommand)]
        action: WordsAction,
    },
    /// Check the vocabulary backend and print a short report
    Check,
}

#[derive(Subcommand)]
pub enum WordsAction {
    /// Show total/trained/untrained counts
    Stats,
    /// Random sample of words
    Sample {
        #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_SIZE)]
        count: usize,

        /// Only words already trained
        #[arg(long)]
        trained: bool,
    },
    /// Words not trained yet
    Untrained {
        #[arg(short = 'n', long, default_value_t = DEFAULT_UNTRAINED_BATCH)]
        count: usize,
    },
    /// Look up a word
    Find { word: String },
    /// Mark a word as trained
    Mark { word: String },
    /// Print the drill prompt for a word
    Drill { word: String },
    /// Seed the collection from a JSON array of words
    Import { path: PathBuf },
}
