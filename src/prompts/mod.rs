//! Prompt construction
//!
//! Turns an article and the density parameters into the two-message
//! conversation sent to the provider. Building a conversation is a pure
//! function: the same inputs always produce byte-identical messages.

pub mod chain_of_density;

use crate::config::DensityConfig;
use crate::providers::{Conversation, Message};
use serde::{Deserialize, Serialize};

/// Numeric parameters interpolated into the chain of density prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityParams {
    /// Number of summarization passes the model should perform
    pub num_passes: u32,
    /// Target word count of every summary
    pub length_in_words: u32,
    /// Upper bound on new entities introduced per pass
    pub num_entities: u32,
}

impl Default for DensityParams {
    fn default() -> Self {
        DensityConfig::default().params()
    }
}

/// Builds the chain of density conversation for an article
///
/// The result always holds exactly two messages: the system persona
/// followed by the user task carrying the article.
///
/// # Examples
///
/// ```
/// use chain_of_density::prompts::{build_conversation, DensityParams};
/// use chain_of_density::providers::Role;
///
/// let conversation = build_conversation("The cat sat on the mat.", &DensityParams::default());
/// assert_eq!(conversation.messages().len(), 2);
/// assert_eq!(conversation.messages()[0].role, Role::System);
/// assert_eq!(conversation.messages()[1].role, Role::User);
/// ```
pub fn build_conversation(article: &str, params: &DensityParams) -> Conversation {
    Conversation::new(
        Message::system(chain_of_density::SYSTEM_PROMPT),
        Message::user(chain_of_density::generate_density_prompt(article, params)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::Role;

    #[test]
    fn test_default_params_match_config_defaults() {
        let params = DensityParams::default();
        assert_eq!(params.num_passes, 5);
        assert_eq!(params.length_in_words, 80);
        assert_eq!(params.num_entities, 3);
        assert_eq!(params, DensityConfig::default().params());
    }

    #[test]
    fn test_conversation_has_system_then_user() {
        let conversation = build_conversation("Some article", &DensityParams::default());
        let messages = conversation.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, chain_of_density::SYSTEM_PROMPT);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn test_single_pass_article() {
        let params = DensityParams {
            num_passes: 1,
            ..DensityParams::default()
        };
        let conversation = build_conversation("The cat sat on the mat.", &params);
        let prompt = &conversation.messages()[1].content;
        assert!(prompt.contains("The cat sat on the mat."));
        assert!(prompt.contains("repeat the following 2 steps 1 times"));
        assert!(prompt.contains("Repeat the steps 1 times"));
    }

    #[test]
    fn test_build_conversation_is_idempotent() {
        let params = DensityParams {
            num_passes: 3,
            length_in_words: 50,
            num_entities: 2,
        };
        let first = build_conversation("Identical input", &params);
        let second = build_conversation("Identical input", &params);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_empty_article_is_accepted() {
        let conversation = build_conversation("", &DensityParams::default());
        assert!(conversation.messages()[1].content.starts_with("Article:\n\n"));
    }
}
