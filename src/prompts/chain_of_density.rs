//! Chain of density prompt template
//!
//! The model is asked to run every summarization pass itself and to return
//! all of them at once. This module only renders the instructions.

use super::DensityParams;

/// System message establishing the assistant's expertise
pub const SYSTEM_PROMPT: &str =
    "You are an expert in writing rich and dense summaries in broad domains.";

/// Generates the user message for the chain of density technique
///
/// The article is embedded verbatim ahead of the instructions. Its content is
/// not sanitized, so text inside the article can compete with the
/// instructions that follow it.
///
/// # Examples
///
/// ```
/// use chain_of_density::prompts::chain_of_density::generate_density_prompt;
/// use chain_of_density::prompts::DensityParams;
///
/// let prompt = generate_density_prompt("The cat sat on the mat.", &DensityParams::default());
/// assert!(prompt.starts_with("Article:\nThe cat sat on the mat."));
/// assert!(prompt.contains("repeat the following 2 steps 5 times"));
/// ```
pub fn generate_density_prompt(article: &str, params: &DensityParams) -> String {
    format!(
        r#"Article:
{article}

----

You will generate increasingly concise, entity-dense summaries of the
above Article.

You must repeat the following 2 steps {num_passes} times.

- Step 1: Identify 1-{num_entities} informative entities from the Article
which are missing from the previously generated summary and are the most
relevant.

- Step 2: Write a new, denser summary of identical length which covers
every entity and detail from the previous summary plus the missing
entities.

A Missing Entity is:

- Relevant: to the main story
- Specific: descriptive yet concise (5 words or fewer)
- Novel: not in the previous summary
- Faithful: present in the Article
- Anywhere: located anywhere in the Article

Guidelines:
- The first summary should be long (4-5 sentences, approx. 80 words) yet
highly non-specific, containing little information beyond the entities
marked as missing.

- Use overly verbose language and fillers (e.g. "this article discusses")
to reach approximately {length_in_words} words.

- Make every word count: re-write the previous summary to improve flow and
make space for additional entities.

- Make space with fusion, compression, and removal of uninformative
phrases like "the article discusses"

- The summaries should become highly dense and concise yet
self-contained, e.g., easily understood without the Article.

- Missing entities can appear anywhere in the new summary.

- Never drop entities from the previous summary. If space cannot be made,
add fewer new entities.

> Remember to use the exact same number of words for each summary.
> Write the missing entities in missing_entities
> Write the summary in denser_summary
> Repeat the steps {num_passes} times per instructions above
"#,
        article = article,
        num_passes = params.num_passes,
        num_entities = params.num_entities,
        length_in_words = params.length_in_words,
    )
}
