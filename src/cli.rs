//! Command-line interface definition for the summarizer
//!
//! This module defines the CLI structure using clap's derive API. There is a
//! single command with no subcommands; numeric options are optional here so
//! that the configuration layer can tell "not given" apart from a default.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// cod - chain of density summarizer
///
/// Reads an article and asks a hosted language model for a sequence of
/// increasingly entity-dense summaries of identical length.
#[derive(Parser, Debug, Clone)]
#[command(name = "cod")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the file to summarize
    #[arg(long)]
    pub file: PathBuf,

    /// Number of summarization passes [default: 5]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub num_passes: Option<u32>,

    /// Length of each summary in words [default: 80]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub length_in_words: Option<u32>,

    /// Number of entities to identify in each pass [default: 3]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub num_entities: Option<u32>,

    /// Model to use for summarization [default: gpt-4o-2024-08-06]
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "COD_API_BASE")]
    pub api_base: Option<String>,

    /// Path to an optional YAML configuration file
    #[arg(short, long, default_value = "cod.yaml")]
    pub config: Option<String>,

    /// Output format for the summaries
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// How the summary collection is written to standard output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Summary text, entity list and a `---` separator per pass
    #[default]
    Text,
    /// The whole collection as pretty-printed JSON
    Json,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
