//! Streaming text-generation client
//!
//! A minimal client for Hugging Face text-generation-inference endpoints
//! with no domain-specific logic. Responses are consumed as server-sent
//! events and assembled into a single string; callers never see a partial
//! generation.
//!
//! # Example
//!
//! ```rust,ignore
//! use inference_client::{format_instruct_prompt, GenerationParams, InferenceClient, TextGenerator};
//!
//! let client = InferenceClient::from_env()?;
//!
//! let prompt = format_instruct_prompt("You are a helpful assistant.", "Hello!");
//! let text = client.generate(&prompt, &GenerationParams::default()).await?;
//! ```
//!
//! # Substituting the backend
//!
//! Anything implementing [`TextGenerator::stream`] gets the same assembly and
//! timeout behavior, which is how tests swap in scripted fragment streams.

pub mod error;
pub mod generator;
pub mod prompt;
pub mod streaming;
pub mod types;

pub use error::{InferenceError, Result};
pub use generator::{assemble_fragments, FragmentStream, TextGenerator, DEFAULT_TIMEOUT};
pub use prompt::format_instruct_prompt;
pub use streaming::{TokenChunk, TokenStream};
pub use types::*;

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Default hosted inference endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Default instruct model.
pub const DEFAULT_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

/// Streaming text-generation client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct InferenceClient {
    http_client: Client,
    api_token: Option<String>,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl InferenceClient {
    /// Create a client for the default endpoint and model.
    pub fn new(api_token: Option<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_token,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from environment variable `HF_API_TOKEN` (optional for
    /// self-hosted endpoints).
    pub fn from_env() -> Result<Self> {
        let api_token = match std::env::var("HF_API_TOKEN") {
            Ok(token) if token.trim().is_empty() => {
                return Err(InferenceError::Config("HF_API_TOKEN is empty".into()))
            }
            Ok(token) => Some(token),
            Err(_) => None,
        };
        Ok(Self::new(api_token))
    }

    /// Set a custom base URL (self-hosted TGI, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the model id appended to the base URL.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the deadline used by [`TextGenerator::generate`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model id.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL generation requests are posted to.
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, self.model)
    }

    /// Streaming generation.
    ///
    /// Sends one request and returns the token event stream.
    pub async fn generate_stream(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<TokenStream> {
        use reqwest::header;

        let request = GenerateRequest::streaming(prompt, params);

        let mut builder = self
            .http_client
            .post(self.endpoint())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "text/event-stream")
            .json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        debug!(
            model = %self.model,
            prompt_length = prompt.len(),
            max_new_tokens = request.parameters.max_new_tokens,
            "Starting streaming generation"
        );

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Inference request failed");
            InferenceError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Inference API error");
            return Err(InferenceError::Api(format!(
                "Inference API error ({}): {}",
                status, error_text
            )));
        }

        Ok(TokenStream::new(response.bytes_stream()))
    }
}

#[async_trait]
impl TextGenerator for InferenceClient {
    async fn stream(&self, prompt: &str, params: &GenerationParams) -> Result<FragmentStream> {
        let tokens = self.generate_stream(prompt, params).await?;
        Ok(Box::pin(tokens.map_ok(|chunk| chunk.text)))
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
