//! Summary data model and structured-output validation
//!
//! The provider is asked to answer with a `DenserSummaryCollection` JSON
//! document. Its reply is checked field by field against that shape before
//! any [`SummaryRecord`] is built, so a malformed reply never yields a
//! partially filled collection.

use crate::error::{CodError, Result};
use crate::providers::ResponseFormat;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Schema name reported to the provider
pub const SCHEMA_NAME: &str = "DenserSummaryCollection";

/// One pass of the chain of density
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Summary text for this pass
    pub denser_summary: String,
    /// Entities newly introduced in this pass, in the model's order
    pub missing_entities: Vec<String>,
}

/// Every pass returned by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCollection {
    /// System prompt as echoed by the model
    pub system_prompt: String,
    /// User prompt as echoed by the model
    pub prompt: String,
    /// Summaries in pass order
    pub summaries: Vec<SummaryRecord>,
}

/// JSON schema describing [`SummaryCollection`]
///
/// Every property is required and no extra properties are allowed, as strict
/// structured output demands.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "system_prompt": { "type": "string" },
            "prompt": { "type": "string" },
            "summaries": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "denser_summary": { "type": "string" },
                        "missing_entities": {
                            "type": "array",
                            "items": { "type": "string" }
                        }
                    },
                    "required": ["denser_summary", "missing_entities"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["system_prompt", "prompt", "summaries"],
        "additionalProperties": false
    })
}

/// Structured output request for a summary collection
pub fn response_format() -> ResponseFormat {
    ResponseFormat::json_schema(SCHEMA_NAME, response_schema())
}

fn schema_error(message: String) -> anyhow::Error {
    CodError::RemoteService(format!("Response does not match {}: {}", SCHEMA_NAME, message)).into()
}

fn require_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| schema_error(format!("`{}` must be an object", path)))
}

fn require_field<'a>(object: &'a Map<String, Value>, field: &str, path: &str) -> Result<&'a Value> {
    object
        .get(field)
        .ok_or_else(|| schema_error(format!("missing required field `{}`", path)))
}

fn require_string(object: &Map<String, Value>, field: &str, path: &str) -> Result<String> {
    require_field(object, field, path)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| schema_error(format!("`{}` must be a string", path)))
}

fn require_array<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<&'a Vec<Value>> {
    require_field(object, field, path)?
        .as_array()
        .ok_or_else(|| schema_error(format!("`{}` must be an array", path)))
}

impl SummaryRecord {
    fn from_value(value: &Value, path: &str) -> Result<Self> {
        let object = require_object(value, path)?;
        let denser_summary =
            require_string(object, "denser_summary", &format!("{}.denser_summary", path))?;

        let entities_path = format!("{}.missing_entities", path);
        let missing_entities = require_array(object, "missing_entities", &entities_path)?
            .iter()
            .enumerate()
            .map(|(i, entity)| {
                entity.as_str().map(str::to_string).ok_or_else(|| {
                    schema_error(format!("`{}[{}]` must be a string", entities_path, i))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            denser_summary,
            missing_entities,
        })
    }
}

impl SummaryCollection {
    /// Parse and validate the model's JSON reply
    ///
    /// # Errors
    ///
    /// Returns `CodError::RemoteService` if the text is not JSON, a required
    /// field is missing or has the wrong type, or no summaries were returned
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_of_density::summary::SummaryCollection;
    ///
    /// let reply = r#"{"system_prompt": "s", "prompt": "p",
    ///     "summaries": [{"denser_summary": "A cat rests.", "missing_entities": ["cat"]}]}"#;
    /// let collection = SummaryCollection::from_json(reply).unwrap();
    /// assert_eq!(collection.summaries[0].missing_entities, vec!["cat"]);
    /// ```
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| schema_error(format!("reply is not valid JSON: {}", e)))?;
        Self::from_value(&value)
    }

    /// Validate an already-parsed JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = require_object(value, "$")?;
        let system_prompt = require_string(object, "system_prompt", "system_prompt")?;
        let prompt = require_string(object, "prompt", "prompt")?;
        let summaries = require_array(object, "summaries", "summaries")?
            .iter()
            .enumerate()
            .map(|(i, item)| SummaryRecord::from_value(item, &format!("summaries[{}]", i)))
            .collect::<Result<Vec<_>>>()?;

        if summaries.is_empty() {
            return Err(CodError::RemoteService("Model returned no summaries".to_string()).into());
        }

        Ok(Self {
            system_prompt,
            prompt,
            summaries,
        })
    }

    /// Log a warning when the number of passes differs from the request
    ///
    /// The model is asked for `expected` passes but is free to return more or
    /// fewer; that is accepted as-is.
    pub fn check_pass_count(&self, expected: u32) -> bool {
        let matches = self.summaries.len() == expected as usize;
        if !matches {
            tracing::warn!(
                requested = expected,
                returned = self.summaries.len(),
                "Model returned a different number of summaries than requested"
            );
        }
        matches
    }
}
