//! Text-generation request types and generation parameters.

use serde::Serialize;

/// Lowest temperature sent to the backend; zero makes sampling degenerate.
pub const MIN_TEMPERATURE: f32 = 0.01;

/// Upper bound for `max_new_tokens`.
pub const MAX_NEW_TOKENS_LIMIT: u32 = 1024;

// =============================================================================
// Generation Parameters
// =============================================================================

/// Sampling parameters for a single generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature, floored at [`MIN_TEMPERATURE`]
    pub temperature: f32,

    /// Maximum tokens to generate (1..=[`MAX_NEW_TOKENS_LIMIT`])
    pub max_new_tokens: u32,

    /// Nucleus sampling probability mass
    pub top_p: f32,

    /// Penalty applied to repeated tokens (1.0 disables)
    pub repetition_penalty: f32,

    /// Fixed seed so identical prompts sample identically
    pub seed: u64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_new_tokens: 256,
            top_p: 0.95,
            repetition_penalty: 1.0,
            seed: 42,
        }
    }
}

impl GenerationParams {
    /// Set temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the token budget.
    pub fn max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    /// Set nucleus sampling top-p.
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    /// Set repetition penalty.
    pub fn repetition_penalty(mut self, repetition_penalty: f32) -> Self {
        self.repetition_penalty = repetition_penalty;
        self
    }

    /// Set the sampling seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Clamp parameters into the range the backend accepts.
    pub fn normalized(mut self) -> Self {
        // NaN fails the comparison and is floored as well
        if !(self.temperature >= MIN_TEMPERATURE) {
            self.temperature = MIN_TEMPERATURE;
        }
        self.max_new_tokens = self.max_new_tokens.clamp(1, MAX_NEW_TOKENS_LIMIT);
        self
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Streaming text-generation request body.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub inputs: String,
    pub parameters: GenerateParameters,
    pub stream: bool,
}

/// `parameters` object of a text-generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateParameters {
    pub temperature: f32,
    pub max_new_tokens: u32,
    pub top_p: f32,
    pub repetition_penalty: f32,
    pub do_sample: bool,
    pub seed: u64,
    pub details: bool,
    pub return_full_text: bool,
}

impl GenerateRequest {
    /// Build a streaming request; parameters are normalized first.
    pub fn streaming(prompt: impl Into<String>, params: &GenerationParams) -> Self {
        let params = params.clone().normalized();
        Self {
            inputs: prompt.into(),
            parameters: GenerateParameters {
                temperature: params.temperature,
                max_new_tokens: params.max_new_tokens,
                top_p: params.top_p,
                repetition_penalty: params.repetition_penalty,
                do_sample: true,
                seed: params.seed,
                details: true,
                return_full_text: false,
            },
            stream: true,
        }
    }
}
