mod client;
pub(crate) mod types;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AiError;
use crate::traits::{SamplingConfig, TextGenerator};
use crate::util::env_key;

use client::ClaudeClient;
use types::*;

pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";

// =============================================================================
// Claude Generator
// =============================================================================

#[derive(Clone)]
pub struct Claude {
    api_key: Option<String>,
    pub(crate) model: String,
    base_url: Option<String>,
}

impl Claude {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            api_key: (!api_key.trim().is_empty()).then_some(api_key),
            model: model.into(),
            base_url: None,
        }
    }

    /// Build from `ANTHROPIC_API_KEY`; calls fail with `AiError::Config` when unset.
    pub fn from_env(model: impl Into<String>) -> Self {
        Self {
            api_key: env_key("ANTHROPIC_API_KEY"),
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

    fn client(&self) -> Result<ClaudeClient, AiError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::Config("ANTHROPIC_API_KEY is not set".to_string()))?;
        let client = ClaudeClient::new(key);
        Ok(if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        })
    }
}

#[async_trait]
impl TextGenerator for Claude {
    async fn generate_text(
        &self,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> Result<String, AiError> {
        let request = ChatRequest::new(&self.model)
            .message(WireMessage::user(prompt))
            .sampling(sampling);

        let response = self.client()?.chat(&request).await?;

        if response.hit_max_tokens() {
            debug!(model = %self.model, "Claude stopped at max_tokens");
        }

        response
            .text()
            .ok_or_else(|| AiError::Api("No response from Claude".to_string()))
    }

    fn name(&self) -> &str {
        "claude"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claude_new() {
        let ai = Claude::new("sk-ant-test", DEFAULT_CLAUDE_MODEL);
        assert_eq!(ai.model, "claude-sonnet-4-20250514");
        assert_eq!(ai.api_key.as_deref(), Some("sk-ant-test"));
    }

    #[test]
    fn test_claude_with_base_url() {
        let ai = Claude::new("sk-ant-test", DEFAULT_CLAUDE_MODEL)
            .with_base_url("https://custom.api.com");
        assert_eq!(ai.base_url, Some("https://custom.api.com".to_string()));
    }

    #[tokio::test]
    async fn test_unconfigured_call_is_config_error() {
        let ai = Claude::new("", DEFAULT_CLAUDE_MODEL);
        let err = ai
            .generate_text("hello", &SamplingConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::Config(_)));
    }
}
