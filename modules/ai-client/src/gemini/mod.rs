mod client;
pub(crate) mod types;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AiError;
use crate::traits::{SamplingConfig, TextGenerator};
use crate::util::env_key;

use client::GeminiClient;
use types::GenerateRequest;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

// =============================================================================
// Gemini Generator
// =============================================================================

#[derive(Clone)]
pub struct Gemini {
    api_key: Option<String>,
    pub(crate) model: String,
    base_url: Option<String>,
}

impl Gemini {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            api_key: (!api_key.trim().is_empty()).then_some(api_key),
            model: model.into(),
            base_url: None,
        }
    }

    /// Build from `GEMINI_API_KEY`. A missing key is not an error here; every
    /// call then fails with `AiError::Config`.
    pub fn from_env(model: impl Into<String>) -> Self {
        Self {
            api_key: env_key("GEMINI_API_KEY"),
            model: model.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn client(&self) -> Result<GeminiClient, AiError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::Config("GEMINI_API_KEY is not set".to_string()))?;
        let client = GeminiClient::new(key);
        Ok(match self.base_url {
            Some(ref url) => client.with_base_url(url),
            None => client,
        })
    }
}

#[async_trait]
impl TextGenerator for Gemini {
    async fn generate_text(
        &self,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> Result<String, AiError> {
        let request = GenerateRequest::new(prompt, sampling);
        let response = self.client()?.generate_content(&self.model, &request).await?;

        if response.stopped_early() {
            debug!(
                model = %self.model,
                finish_reason = response.finish_reason().unwrap_or_default(),
                "Gemini stopped before completing"
            );
        }

        response
            .text()
            .ok_or_else(|| AiError::Api("Empty response from Gemini".to_string()))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
