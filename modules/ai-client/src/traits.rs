use async_trait::async_trait;

use crate::error::AiError;

// =============================================================================
// Sampling
// =============================================================================

/// Generation-time parameters controlling randomness and length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub max_output_tokens: u32,
}

impl SamplingConfig {
    pub fn new(temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            temperature,
            top_p: None,
            top_k: None,
            max_output_tokens,
        }
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::new(0.0, 4096)
    }
}

// =============================================================================
// TextGenerator Trait
// =============================================================================

/// Single-prompt text generation. Implementations are stateless from the
/// caller's side and shared across concurrent requests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(
        &self,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> Result<String, AiError>;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_nucleus_parameters() {
        let sampling = SamplingConfig::new(0.8, 4000).top_p(0.9).top_k(40);
        assert_eq!(sampling.temperature, 0.8);
        assert_eq!(sampling.top_p, Some(0.9));
        assert_eq!(sampling.top_k, Some(40));
        assert_eq!(sampling.max_output_tokens, 4000);
    }

    #[test]
    fn default_is_deterministic() {
        let sampling = SamplingConfig::default();
        assert_eq!(sampling.temperature, 0.0);
        assert!(sampling.top_p.is_none());
    }
}
