//! Command line argument parsing for the Phonesis CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Phonesis - syllable vocabulary trainer and tokenizer
#[derive(Parser, Debug, Clone)]
#[command(name = "phonesis")]
#[command(about = "Phonetically-motivated syllable tokenizer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PhonesisArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PhonesisArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build a vocabulary from a word list
    Train(TrainArgs),

    /// Tokenize text with a trained model
    Tokenize(TokenizeArgs),

    /// Show how words are split into fragments
    Segment(SegmentArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Line-delimited word list; every line is one training sample
    #[arg(value_name = "WORDS_FILE")]
    pub words_file: PathBuf,

    /// Alphabet record (JSON with `consonants` and `vowels`); English if omitted
    #[arg(short, long, value_name = "ALPHABET_FILE")]
    pub alphabet: Option<PathBuf>,

    /// Where to write the trained model record
    #[arg(short, long, value_name = "MODEL_FILE", default_value = "phonesis_model.json")]
    pub output: PathBuf,

    /// Existing model whose vocabulary is extended instead of starting empty
    #[arg(long, value_name = "MODEL_FILE")]
    pub base: Option<PathBuf>,

    /// Words between two progress reports (0 disables them)
    #[arg(long, default_value = "1000")]
    pub progress_interval: usize,
}

/// Arguments for tokenization
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Model record produced by `train`
    #[arg(short, long, value_name = "MODEL_FILE", env = "PHONESIS_MODEL")]
    pub model: PathBuf,

    /// Texts to tokenize; lines are read from stdin when none are given
    #[arg(value_name = "TEXT")]
    pub texts: Vec<String>,

    /// Record unknown fragments instead of failing on them
    #[arg(long)]
    pub lenient: bool,

    /// Tokenize the given texts in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for segmentation
#[derive(Parser, Debug, Clone)]
pub struct SegmentArgs {
    /// Words or phrases to segment
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    /// Alphabet record (JSON with `consonants` and `vowels`); English if omitted
    #[arg(short, long, value_name = "ALPHABET_FILE")]
    pub alphabet: Option<PathBuf>,
}

impl TokenizeArgs {
    /// Check if unknown fragments abort tokenization
    pub fn strict(&self) -> bool {
        !self.lenient
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
