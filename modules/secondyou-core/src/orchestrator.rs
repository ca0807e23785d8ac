use std::sync::Arc;
use std::time::{Duration, Instant};

use ai_client::{AiError, SamplingConfig, TextGenerator};
use chrono::Utc;
use tracing::{info, warn};

use secondyou_common::{
    PathKind, PathNarrative, ProfileInput, SimulationError, SimulationMetadata, SimulationResult,
};

use crate::parser::parse_narrative;
use crate::prompts::{build_alternate_prompt, build_current_path_prompt};

/// Sampling for the changed life: more variety, larger budget.
pub const ALTERNATE_SAMPLING: SamplingConfig = SamplingConfig {
    temperature: 0.8,
    top_p: Some(0.9),
    top_k: Some(40),
    max_output_tokens: 4000,
};

/// Sampling for the unchanged life: steadier, slightly smaller budget.
pub const CURRENT_SAMPLING: SamplingConfig = SamplingConfig {
    temperature: 0.7,
    top_p: Some(0.85),
    top_k: Some(40),
    max_output_tokens: 3500,
};

const HEALTH_PROMPT: &str = "Respond with exactly: 'Service is healthy'";
const HEALTH_REPLY: &str = "Service is healthy";
const HEALTH_SAMPLING: SamplingConfig = SamplingConfig {
    temperature: 0.0,
    top_p: None,
    top_k: None,
    max_output_tokens: 10,
};

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs both path generations for a validated profile and assembles the result.
#[derive(Clone)]
pub struct SimulationOrchestrator {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl SimulationOrchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider(&self) -> &str {
        self.generator.name()
    }

    /// Generate both narratives concurrently. Either both succeed or the
    /// request fails; when both fail the alternate-path error is returned.
    pub async fn generate(
        &self,
        profile: &ProfileInput,
    ) -> Result<SimulationResult, SimulationError> {
        let alternate_prompt = build_alternate_prompt(profile);
        let current_prompt = build_current_path_prompt(profile);

        let started = Instant::now();
        let (alternate, current) = tokio::join!(
            self.generate_path(PathKind::Alternate, &alternate_prompt, &ALTERNATE_SAMPLING),
            self.generate_path(PathKind::Current, &current_prompt, &CURRENT_SAMPLING),
        );
        let alternate_text = alternate?;
        let current_text = current?;

        let alternate_path = parse_path(PathKind::Alternate, &alternate_text)?;
        let current_path = parse_path(PathKind::Current, &current_text)?;

        info!(
            provider = self.generator.name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Simulation generated"
        );

        Ok(SimulationResult {
            alternate_path,
            current_path,
            metadata: SimulationMetadata {
                generated_at: Utc::now(),
                user_age: profile.age,
                alternate_decision: profile.alternate_path.clone(),
            },
        })
    }

    async fn generate_path(
        &self,
        kind: PathKind,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> Result<String, SimulationError> {
        let call = self.generator.generate_text(prompt, sampling);
        match tokio::time::timeout(self.timeout, call).await {
            Err(_) => {
                warn!(path = %kind, timeout_secs = self.timeout.as_secs(), "Generation timed out");
                Err(SimulationError::Generation(format!(
                    "{kind} generation timed out after {}s",
                    self.timeout.as_secs()
                )))
            }
            Ok(Err(e)) => {
                warn!(path = %kind, error = %e, "Generation failed");
                Err(name_path(kind, classify_ai_error(&e)))
            }
            Ok(Ok(text)) if text.trim().is_empty() => Err(SimulationError::Generation(format!(
                "Empty response for {kind}"
            ))),
            Ok(Ok(text)) => Ok(text),
        }
    }

    /// Probe the provider with a trivial prompt. Any failure reads as unavailable.
    pub async fn check_health(&self) -> bool {
        let call = self.generator.generate_text(HEALTH_PROMPT, &HEALTH_SAMPLING);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(text)) => text.contains(HEALTH_REPLY),
            Ok(Err(e)) => {
                warn!(error = %e, "Health check failed");
                false
            }
            Err(_) => {
                warn!("Health check timed out");
                false
            }
        }
    }
}

/// Prefix generic failures with the path they came from. Configuration and
/// rate-limit errors stay as classified.
fn name_path(kind: PathKind, err: SimulationError) -> SimulationError {
    match err {
        SimulationError::Generation(msg) => SimulationError::Generation(format!("{kind}: {msg}")),
        other => other,
    }
}

fn parse_path(kind: PathKind, raw: &str) -> Result<PathNarrative, SimulationError> {
    parse_narrative(raw).map_err(|e| SimulationError::Parse(format!("{kind}: {e}")))
}

/// Map a provider error onto the simulation error taxonomy.
///
/// Typed variants win; otherwise the message is inspected for credential
/// ("api key") and quota ("quota", "limit") wording.
pub fn classify_ai_error(err: &AiError) -> SimulationError {
    let message = err.to_string();
    let lower = message.to_lowercase();

    match err {
        AiError::Config(_) => SimulationError::Configuration(message),
        AiError::RateLimited(_) => SimulationError::RateLimited(message),
        _ if lower.contains("api_key") || lower.contains("api key") => {
            SimulationError::Configuration(message)
        }
        _ if lower.contains("quota") || lower.contains("limit") => {
            SimulationError::RateLimited(message)
        }
        _ => SimulationError::Generation(message),
    }
}
