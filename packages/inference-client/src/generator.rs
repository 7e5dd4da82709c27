//! Backend-agnostic text generation.
//!
//! A [`TextGenerator`] only has to produce an ordered stream of text
//! fragments. Assembling them into one response and enforcing the deadline
//! happen here, so the HTTP client and test doubles share the same policy.

use async_trait::async_trait;
use futures::stream::{Stream, TryStreamExt};
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;

use crate::error::{InferenceError, Result};
use crate::types::GenerationParams;

/// Deadline applied when the generator does not specify one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Ordered text fragments of one generation.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Start a generation and return its fragment stream.
    async fn stream(&self, prompt: &str, params: &GenerationParams) -> Result<FragmentStream>;

    /// Deadline for [`TextGenerator::generate`].
    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }

    /// Generate a complete response within the generator's own deadline.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        self.generate_with_timeout(prompt, params, self.timeout()).await
    }

    /// Generate a complete response, failing with [`InferenceError::Timeout`]
    /// once `timeout` elapses. The stream, and with it the connection, is
    /// dropped on every failure path.
    async fn generate_with_timeout(
        &self,
        prompt: &str,
        params: &GenerationParams,
        timeout: Duration,
    ) -> Result<String> {
        let params = params.clone().normalized();
        let start = std::time::Instant::now();

        let generation = async {
            let fragments = self.stream(prompt, &params).await?;
            assemble_fragments(fragments).await
        };

        let output = tokio::time::timeout(timeout, generation)
            .await
            .map_err(|_| InferenceError::Timeout(timeout))??;

        debug!(
            prompt_length = prompt.len(),
            response_length = output.len(),
            duration_ms = start.elapsed().as_millis(),
            "Generation assembled"
        );

        Ok(output)
    }
}

/// Concatenate fragments in arrival order.
///
/// Fails on the first error; the partial output is discarded with it.
pub async fn assemble_fragments<S>(fragments: S) -> Result<String>
where
    S: Stream<Item = Result<String>> + Send,
{
    fragments
        .try_fold(String::new(), |mut output, fragment| async move {
            output.push_str(&fragment);
            Ok(output)
        })
        .await
}
