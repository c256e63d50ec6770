//! Configuration management for the summarizer
//!
//! Configuration is layered: built-in defaults, then an optional YAML file,
//! then `COD_*` environment variables, then CLI flags. The result is checked
//! by [`Config::validate`] before anything touches the network.

use crate::cli::Cli;
use crate::error::{CodError, Result};
use crate::prompts::DensityParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Remote provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Chain of density prompt parameters
    #[serde(default)]
    pub density: DensityConfig,
}

/// OpenAI-compatible provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    /// Model identifier sent with the request
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the API; `/chat/completions` is appended
    ///
    /// Pointing this at a local mock server is how the integration tests run
    /// without network access.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_model() -> String {
    "gpt-4o-2024-08-06".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    API_KEY_ENV.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Prompt parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DensityConfig {
    /// Number of summarization passes requested from the model
    #[serde(default = "default_num_passes")]
    pub num_passes: u32,

    /// Target word count per summary
    #[serde(default = "default_length_in_words")]
    pub length_in_words: u32,

    /// Maximum number of new entities per pass
    #[serde(default = "default_num_entities")]
    pub num_entities: u32,
}

fn default_num_passes() -> u32 {
    5
}

fn default_length_in_words() -> u32 {
    80
}

fn default_num_entities() -> u32 {
    3
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            num_passes: default_num_passes(),
            length_in_words: default_length_in_words(),
            num_entities: default_num_entities(),
        }
    }
}

impl DensityConfig {
    /// Prompt parameters for the Prompt Builder
    pub fn params(&self) -> DensityParams {
        DensityParams {
            num_passes: self.num_passes,
            length_in_words: self.length_in_words,
            num_entities: self.num_entities,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CodError::Configuration(format!("Failed to read config file {}: {}", path, e))
        })?;
        serde_yaml::from_str(&contents).map_err(|e| {
            CodError::Configuration(format!("Failed to parse config {}: {}", path, e)).into()
        })
    }

    fn apply_env_vars(&mut self) {
        if let Ok(model) = std::env::var("COD_MODEL") {
            tracing::debug!(model = %model, "Env override: COD_MODEL");
            self.provider.model = model;
        }

        if let Ok(api_base) = std::env::var("COD_API_BASE") {
            tracing::debug!(api_base = %api_base, "Env override: COD_API_BASE");
            self.provider.api_base = api_base;
        }

        apply_u32_env("COD_NUM_PASSES", &mut self.density.num_passes);
        apply_u32_env("COD_LENGTH_IN_WORDS", &mut self.density.length_in_words);
        apply_u32_env("COD_NUM_ENTITIES", &mut self.density.num_entities);
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(model) = &cli.model {
            self.provider.model = model.clone();
        }
        if let Some(api_base) = &cli.api_base {
            self.provider.api_base = api_base.clone();
        }
        if let Some(n) = cli.num_passes {
            self.density.num_passes = n;
        }
        if let Some(n) = cli.length_in_words {
            self.density.length_in_words = n;
        }
        if let Some(n) = cli.num_entities {
            self.density.num_entities = n;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a `CodError::Configuration` naming the first invalid field
    pub fn validate(&self) -> Result<()> {
        if self.provider.model.trim().is_empty() {
            return Err(CodError::Configuration("model cannot be empty".to_string()).into());
        }

        if !self.provider.api_base.starts_with("http://")
            && !self.provider.api_base.starts_with("https://")
        {
            return Err(CodError::Configuration(format!(
                "api_base must be an http(s) URL, got: {}",
                self.provider.api_base
            ))
            .into());
        }

        if self.provider.api_key_env.trim().is_empty() {
            return Err(
                CodError::Configuration("api_key_env cannot be empty".to_string()).into(),
            );
        }

        if self.density.num_passes == 0 {
            return Err(
                CodError::Configuration("num_passes must be greater than 0".to_string()).into(),
            );
        }

        if self.density.length_in_words == 0 {
            return Err(CodError::Configuration(
                "length_in_words must be greater than 0".to_string(),
            )
            .into());
        }

        if self.density.num_entities == 0 {
            return Err(
                CodError::Configuration("num_entities must be greater than 0".to_string()).into(),
            );
        }

        Ok(())
    }
}

fn apply_u32_env(name: &str, target: &mut u32) {
    if let Ok(raw) = std::env::var(name) {
        match raw.parse::<u32>() {
            Ok(value) => {
                tracing::debug!(value, "Env override: {}", name);
                *target = value;
            }
            Err(_) => tracing::warn!("Invalid {}: {}", name, raw),
        }
    }
}
