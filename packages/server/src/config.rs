use anyhow::{Context, Result};
use dotenvy::dotenv;
use inference_client::{GenerationParams, InferenceClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Only required by commands that touch the report store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub hf_api_token: Option<String>,
    pub inference_base_url: String,
    pub inference_model: String,
    pub inference_timeout: Duration,
    pub generation_params: GenerationParams,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from any variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = GenerationParams::default();

        Ok(Self {
            database_url: var("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            hf_api_token: var("HF_API_TOKEN").filter(|t| !t.trim().is_empty()),
            inference_base_url: var("INFERENCE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            inference_model: var("INFERENCE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            inference_timeout: Duration::from_secs(
                var("INFERENCE_TIMEOUT_SECS")
                    .unwrap_or_else(|| "60".to_string())
                    .parse()
                    .context("INFERENCE_TIMEOUT_SECS must be a valid number")?,
            ),
            generation_params: GenerationParams {
                temperature: var("INFERENCE_TEMPERATURE")
                    .map(|v| v.parse::<f32>())
                    .transpose()
                    .context("INFERENCE_TEMPERATURE must be a number")?
                    .unwrap_or(defaults.temperature),
                max_new_tokens: var("INFERENCE_MAX_NEW_TOKENS")
                    .map(|v| v.parse::<u32>())
                    .transpose()
                    .context("INFERENCE_MAX_NEW_TOKENS must be a valid number")?
                    .unwrap_or(defaults.max_new_tokens),
                ..defaults
            },
        })
    }

    /// The database URL, or an error for commands that cannot run without it.
    pub fn database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set")
    }

    /// Inference client for the configured backend.
    pub fn inference_client(&self) -> InferenceClient {
        InferenceClient::new(self.hf_api_token.clone())
            .with_base_url(&self.inference_base_url)
            .with_model(&self.inference_model)
            .with_timeout(self.inference_timeout)
    }
}
