//! Chain of density summarizer library
//!
//! Produces increasingly entity-dense summaries of an article with a single
//! structured-output request to a hosted language model. The model performs
//! every summarization pass itself; this crate builds the prompt, makes the
//! request, validates the reply, and prints it.
//!
//! # Architecture
//!
//! - `cli`: Command-line interface definition
//! - `config`: Layered configuration (defaults, YAML file, env, CLI)
//! - `prompts`: Chain of density prompt and conversation builder
//! - `providers`: Provider trait and the OpenAI implementation
//! - `summary`: Summary data model, response schema, and validation
//! - `output`: Text and JSON rendering
//! - `commands`: The summarize pipeline
//! - `error`: Error types and result alias
//!
//! # Example
//!
//! ```no_run
//! use chain_of_density::commands::summarize::summarize_file;
//! use chain_of_density::config::Config;
//! use chain_of_density::providers::create_provider;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let collection = summarize_file(
//!         Path::new("article.txt"),
//!         &config.density.params(),
//!         || create_provider(&config.provider),
//!     )
//!     .await?;
//!     println!("{} summaries", collection.summaries.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod prompts;
pub mod providers;
pub mod summary;

// Re-export commonly used types
pub use config::Config;
pub use error::{CodError, Result};
pub use summary::{SummaryCollection, SummaryRecord};

#[cfg(test)]
pub mod test_utils;
