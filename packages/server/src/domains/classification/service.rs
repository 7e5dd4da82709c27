//! Narrative text in, section citations out.

use inference_client::{GenerationParams, InferenceError, TextGenerator};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::models::{extract_citations, Citation};
use crate::config::Config;
use super::prompt::build_prompt;

/// Classification service.
///
/// Holds the generator handle built at startup; clones share it. Never
/// touches storage.
#[derive(Clone)]
pub struct ClassificationService {
    generator: Arc<dyn TextGenerator>,
    params: GenerationParams,
}

impl ClassificationService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            params: GenerationParams::default(),
        }
    }

    /// Service backed by the inference client described by `config`.
    /// Needs no database.
    pub fn from_config(config: &Config) -> Self {
        let client = config.inference_client();
        info!(endpoint = %client.endpoint(), "Inference client configured");
        Self::new(Arc::new(client)).with_params(config.generation_params.clone())
    }

    /// Override the sampling parameters.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Suggest section citations for a narrative.
    pub async fn classify(&self, narrative: &str) -> Result<Vec<Citation>, InferenceError> {
        let prompt = build_prompt(narrative);
        let start = Instant::now();
        let output = self.generator.generate(&prompt, &self.params).await?;
        Ok(self.finish(narrative, &output, start))
    }

    /// Same as [`classify`](Self::classify) with a caller-supplied deadline.
    pub async fn classify_with_timeout(
        &self,
        narrative: &str,
        timeout: Duration,
    ) -> Result<Vec<Citation>, InferenceError> {
        let prompt = build_prompt(narrative);
        let start = Instant::now();
        let output = self
            .generator
            .generate_with_timeout(&prompt, &self.params, timeout)
            .await?;
        Ok(self.finish(narrative, &output, start))
    }

    fn finish(&self, narrative: &str, output: &str, start: Instant) -> Vec<Citation> {
        let citations = extract_citations(output);

        debug!(output = %output, "Raw classification output");
        info!(
            narrative_length = narrative.len(),
            citations = citations.len(),
            duration_ms = start.elapsed().as_millis(),
            "Narrative classified"
        );

        citations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockTextGenerator;

    #[tokio::test]
    async fn test_classify_assembles_and_extracts() {
        let generator =
            Arc::new(MockTextGenerator::new().with_fragments(&["Section 378 ", "Section 457"]));
        let service = ClassificationService::new(generator.clone());

        let citations = service
            .classify("A theft was reported where someone broke into a house and stole valuables.")
            .await
            .unwrap();

        assert_eq!(
            citations,
            vec![Citation::from("Section 378"), Citation::from("Section 457")]
        );

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("stole valuables"));
    }

    #[tokio::test]
    async fn test_citation_split_across_fragments() {
        let generator =
            Arc::new(MockTextGenerator::new().with_fragments(&["Sec", "tion 4", "57A applies"]));
        let service = ClassificationService::new(generator);

        let citations = service.classify("burglary").await.unwrap();
        assert_eq!(citations, vec![Citation::from("Section 457A")]);
    }

    #[tokio::test]
    async fn test_no_citations_is_not_an_error() {
        let generator =
            Arc::new(MockTextGenerator::new().with_fragments(&["I cannot determine that."]));
        let service = ClassificationService::new(generator);

        assert!(service.classify("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_mid_stream_yields_no_citations() {
        let generator = Arc::new(
            MockTextGenerator::new().with_failure_after(&["Section 378 "], "connection reset"),
        );
        let service = ClassificationService::new(generator);

        let err = service.classify("theft").await.unwrap_err();
        assert!(matches!(err, InferenceError::Network(_)));
    }

    #[tokio::test]
    async fn test_request_rejected() {
        let generator = Arc::new(MockTextGenerator::new().with_rejection("model is loading"));
        let service = ClassificationService::new(generator);

        let err = service.classify("theft").await.unwrap_err();
        assert!(matches!(err, InferenceError::Api(_)));
    }

    #[tokio::test]
    async fn test_caller_timeout() {
        let generator = Arc::new(MockTextGenerator::new().stalling());
        let service = ClassificationService::new(generator);

        let err = service
            .classify_with_timeout("theft", Duration::from_millis(20))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_params_forwarded() {
        let generator = Arc::new(MockTextGenerator::new());
        let service = ClassificationService::new(generator.clone())
            .with_params(GenerationParams::default().max_new_tokens(64));

        service.classify("theft").await.unwrap();
        assert_eq!(generator.params()[0].max_new_tokens, 64);
    }

    #[tokio::test]
    async fn test_from_config_needs_no_database() {
        let config = Config::from_vars(|key| match key {
            "INFERENCE_BASE_URL" => Some("http://127.0.0.1:9".to_string()),
            "INFERENCE_TEMPERATURE" => Some("0.5".to_string()),
            _ => None,
        })
        .unwrap();
        assert!(config.database_url.is_none());

        let service = ClassificationService::from_config(&config);
        assert_eq!(service.params().temperature, 0.5);

        // Port 9 is closed; the failure comes from the inference backend
        let err = service
            .classify_with_timeout("theft", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InferenceError::Network(_) | InferenceError::Timeout(_)
        ));
    }
}
