//! Base provider trait and common types
//!
//! This module defines the Provider trait implemented by remote completion
//! backends, along with the message, conversation and response types that
//! cross that seam.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Establishes the assistant persona
    System,
    /// Carries the task and the data
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
        }
    }
}

/// A single message of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new system message
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_of_density::providers::{Message, Role};
    ///
    /// let msg = Message::system("You are a helpful assistant");
    /// assert_eq!(msg.role, Role::System);
    /// ```
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The two-message exchange sent to the provider
///
/// Always a system message followed by a user message. The fields are
/// private so that order cannot be changed after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create a conversation from its system and user messages
    pub fn new(system: Message, user: Message) -> Self {
        Self {
            messages: vec![system, user],
        }
    }

    /// Messages in send order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

/// Token usage information from a completion
///
/// Tracks the number of tokens used in prompts and completions,
/// as reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: usize,
    /// Number of tokens in the completion
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_of_density::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// Structured output request attached to a completion
///
/// Serializes to the OpenAI `response_format` object, e.g.
/// `{"type": "json_schema", "json_schema": {"name": ..., "strict": true, "schema": {...}}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Constrain the reply to a JSON schema
    JsonSchema {
        /// Schema definition
        json_schema: JsonSchemaSpec,
    },
}

/// Named JSON schema for structured output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonSchemaSpec {
    /// Schema name reported to the provider
    pub name: String,
    /// Ask the provider to enforce the schema exactly
    pub strict: bool,
    /// The JSON schema document
    pub schema: serde_json::Value,
}

impl ResponseFormat {
    /// Strict JSON schema response format
    pub fn json_schema(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self::JsonSchema {
            json_schema: JsonSchemaSpec {
                name: name.into(),
                strict: true,
                schema,
            },
        }
    }
}

/// Raw structured reply from a provider
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// The JSON document produced by the model, unparsed
    pub content: String,
    /// Token usage, when the provider reports it
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a response without usage information
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    /// Attach token usage
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Remote completion backend
///
/// Implementations issue exactly one request per call. They never retry and
/// never stream.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Model identifier this provider sends requests for
    fn model(&self) -> String;

    /// Sends the conversation and returns the structured reply
    ///
    /// # Errors
    ///
    /// Returns `CodError::Authentication` when the credential is rejected,
    /// `CodError::Configuration` when the model is unknown to the service,
    /// and `CodError::RemoteService` for any other failure.
    async fn complete(
        &self,
        conversation: &Conversation,
        response_format: &ResponseFormat,
    ) -> Result<CompletionResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_constructors() {
        let system = Message::system("persona");
        assert_eq!(system.role, Role::System);
        assert_eq!(system.content, "persona");

        let user = Message::user("task");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.content, "task");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::System).unwrap(), json!("system"));
        assert_eq!(serde_json::to_value(Role::User).unwrap(), json!("user"));
        assert_eq!(Role::User.to_string(), "user");
    }

    #[test]
    fn test_conversation_serializes_as_message_list() {
        let conversation = Conversation::new(Message::system("s"), Message::user("u"));
        let value = serde_json::to_value(&conversation).unwrap();
        assert_eq!(
            value,
            json!([
                {"role": "system", "content": "s"},
                {"role": "user", "content": "u"}
            ])
        );
    }

    #[test]
    fn test_response_format_wire_shape() {
        let format = ResponseFormat::json_schema("Example", json!({"type": "object"}));
        let value = serde_json::to_value(&format).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "json_schema",
                "json_schema": {
                    "name": "Example",
                    "strict": true,
                    "schema": {"type": "object"}
                }
            })
        );
    }

    #[test]
    fn test_completion_response_with_usage() {
        let response = CompletionResponse::new("{}").with_usage(TokenUsage::new(10, 5));
        assert_eq!(response.content, "{}");
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn test_token_usage_total_saturates() {
        let usage = TokenUsage::new(usize::MAX, 10);
        assert_eq!(usage.total_tokens, usize::MAX);
    }
}
