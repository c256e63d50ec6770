//! Provider module
//!
//! This module contains the remote completion abstraction and the OpenAI
//! implementation behind it.

pub mod base;
pub mod openai;

pub use base::{
    CompletionResponse, Conversation, JsonSchemaSpec, Message, Provider, ResponseFormat, Role,
    TokenUsage,
};
pub use openai::OpenAiProvider;

#[cfg(test)]
pub use base::MockProvider;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Create the provider described by the configuration
///
/// # Errors
///
/// Returns `CodError::Authentication` if the API key is missing, or an error
/// if the HTTP client cannot be initialized
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    Ok(Box::new(OpenAiProvider::new(config.clone())?))
}
