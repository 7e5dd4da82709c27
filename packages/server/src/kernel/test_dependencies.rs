// TestDependencies - mock implementations for testing
//
// Scripted text generation and text recognition for unit and integration tests.

use anyhow::Result;
use async_trait::async_trait;
use futures::stream;
use inference_client::{FragmentStream, GenerationParams, InferenceError, TextGenerator};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::BaseTextRecognizer;

// =============================================================================
// Mock Text Generator
// =============================================================================

/// One scripted generation.
#[derive(Debug, Clone)]
pub enum ScriptedGeneration {
    /// Stream these fragments, then end.
    Fragments(Vec<String>),
    /// Stream these fragments, then fail with a network error.
    FailAfter(Vec<String>, String),
    /// Reject the request before streaming.
    Reject(String),
    /// Never yield a fragment.
    Stall,
}

/// Generator that replays scripted generations in order.
///
/// When the script runs out every call streams nothing.
pub struct MockTextGenerator {
    script: Arc<Mutex<Vec<ScriptedGeneration>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    params: Arc<Mutex<Vec<GenerationParams>>>,
    timeout: Duration,
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            params: Arc::new(Mutex::new(Vec::new())),
            timeout: inference_client::DEFAULT_TIMEOUT,
        }
    }

    fn push(self, generation: ScriptedGeneration) -> Self {
        self.script.lock().unwrap().push(generation);
        self
    }

    pub fn with_fragments(self, fragments: &[&str]) -> Self {
        let fragments = fragments.iter().map(|f| f.to_string()).collect();
        self.push(ScriptedGeneration::Fragments(fragments))
    }

    pub fn with_failure_after(self, fragments: &[&str], message: &str) -> Self {
        let fragments = fragments.iter().map(|f| f.to_string()).collect();
        self.push(ScriptedGeneration::FailAfter(fragments, message.to_string()))
    }

    pub fn with_rejection(self, message: &str) -> Self {
        self.push(ScriptedGeneration::Reject(message.to_string()))
    }

    pub fn stalling(self) -> Self {
        self.push(ScriptedGeneration::Stall)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Parameters received, in call order.
    pub fn params(&self) -> Vec<GenerationParams> {
        self.params.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn stream(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> inference_client::Result<FragmentStream> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.params.lock().unwrap().push(params.clone());

        let next = {
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                None
            } else {
                Some(script.remove(0))
            }
        };

        match next {
            None => Ok(Box::pin(stream::empty::<inference_client::Result<String>>())),
            Some(ScriptedGeneration::Fragments(fragments)) => {
                Ok(Box::pin(stream::iter(
                    fragments.into_iter().map(Ok::<String, InferenceError>),
                )))
            }
            Some(ScriptedGeneration::FailAfter(fragments, message)) => {
                let items = fragments
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(InferenceError::Network(message))));
                Ok(Box::pin(stream::iter(items)))
            }
            Some(ScriptedGeneration::Reject(message)) => Err(InferenceError::Api(message)),
            Some(ScriptedGeneration::Stall) => {
                Ok(Box::pin(stream::pending::<inference_client::Result<String>>()))
            }
        }
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

// =============================================================================
// Mock Text Recognizer
// =============================================================================

pub struct MockTextRecognizer {
    text: String,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<usize>>>,
}

impl Default for MockTextRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextRecognizer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Byte lengths of the images received.
    pub fn calls(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseTextRecognizer for MockTextRecognizer {
    async fn recognize(&self, image: &[u8]) -> Result<String> {
        self.calls.lock().unwrap().push(image.len());
        match &self.failure {
            Some(message) => Err(anyhow::anyhow!("{}", message)),
            None => Ok(self.text.clone()),
        }
    }
}
