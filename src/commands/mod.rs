/*!
Command handlers for the CLI

The binary has a single command, `summarize`, which runs the linear
pipeline: read the article, build the conversation, make one provider
request, validate the reply, and print it. Nothing is printed unless the
whole collection validated.
*/

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{CodError, Result};
use crate::output::print_summaries;
use crate::prompts::{build_conversation, DensityParams};
use crate::providers::{create_provider, Conversation, Provider};
use crate::summary::{self, SummaryCollection};
use std::path::Path;

// Summarize command handler
pub mod summarize {
    //! Chain of density summarization handler.

    use super::*;

    /// Read the article to summarize
    ///
    /// The text is returned untouched; no trimming or normalization.
    ///
    /// # Errors
    ///
    /// Returns `CodError::FileAccess` if the file is missing, unreadable, or
    /// not valid UTF-8
    pub fn read_article(path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            CodError::FileAccess(format!("{}: {}", path.display(), e)).into()
        })
    }

    /// Send a prepared conversation and validate the structured reply
    ///
    /// # Errors
    ///
    /// Propagates provider errors unchanged; returns
    /// `CodError::RemoteService` if the reply fails validation
    pub async fn request_summaries(
        provider: &dyn Provider,
        conversation: &Conversation,
        params: &DensityParams,
    ) -> Result<SummaryCollection> {
        tracing::info!(
            model = %provider.model(),
            num_passes = params.num_passes,
            length_in_words = params.length_in_words,
            num_entities = params.num_entities,
            "Requesting chain of density summaries"
        );

        let response = provider
            .complete(conversation, &summary::response_format())
            .await?;

        if let Some(usage) = response.usage {
            tracing::info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Token usage"
            );
        }

        let collection = SummaryCollection::from_json(&response.content)?;
        collection.check_pass_count(params.num_passes);
        Ok(collection)
    }

    /// Read an article file and summarize it with a provider from `connect`
    ///
    /// The file is read and the conversation built before `connect` runs, so
    /// an unreadable file never creates a provider or makes a request.
    ///
    /// # Errors
    ///
    /// Returns the first error of the pipeline
    pub async fn summarize_file<F>(
        file: &Path,
        params: &DensityParams,
        connect: F,
    ) -> Result<SummaryCollection>
    where
        F: FnOnce() -> Result<Box<dyn Provider>>,
    {
        let article = read_article(file)?;
        tracing::debug!("Read {} bytes from {}", article.len(), file.display());
        let conversation = build_conversation(&article, params);

        let provider = connect()?;
        request_summaries(provider.as_ref(), &conversation, params).await
    }

    /// Run the summarize command and print results to standard output
    ///
    /// # Errors
    ///
    /// Returns the first error of the pipeline; nothing is printed in that case
    pub async fn run_summarize(config: Config, file: &Path, format: OutputFormat) -> Result<()> {
        let params = config.density.params();
        let collection =
            summarize_file(file, &params, || create_provider(&config.provider)).await?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        print_summaries(&collection, format, &mut out)
    }
}
