// Test doubles for the simulation pipeline.
//
// - FakeGenerator (TextGenerator): prompt substring → scripted reply, with
//   optional per-rule delay and a call log
// - Fixture helpers for profiles, marker responses and saved records

use std::sync::Mutex;
use std::time::Duration;

use ai_client::{AiError, SamplingConfig, TextGenerator};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use secondyou_common::{
    PathNarrative, ProfileInput, RawProfile, SavedSimulation, SimulationMetadata, SimulationResult,
};

use crate::history::new_saved_simulation;
use crate::parser::{FUTURE_MESSAGE_MARKER, YEAR_10_MARKER, YEAR_1_MARKER, YEAR_3_MARKER};

/// Substring only the alternate-path prompt contains.
pub const ALTERNATE_PROMPT_HINT: &str = "Alternate Path Being Explored";
/// Substring only the current-path prompt contains.
pub const CURRENT_PROMPT_HINT: &str = "Do NOT Make";
/// Substring of the health probe prompt.
pub const HEALTH_PROMPT_HINT: &str = "Service is healthy";

// ---------------------------------------------------------------------------
// FakeGenerator
// ---------------------------------------------------------------------------

/// What a scripted call answers with. `AiError` is not `Clone`, so failures
/// are stored as data and rebuilt per call.
#[derive(Debug, Clone)]
pub enum FakeReply {
    Text(String),
    ConfigError(String),
    RateLimited(String),
    ApiError(String),
}

impl FakeReply {
    pub fn text(s: impl Into<String>) -> Self {
        FakeReply::Text(s.into())
    }

    fn resolve(&self) -> Result<String, AiError> {
        match self {
            FakeReply::Text(s) => Ok(s.clone()),
            FakeReply::ConfigError(m) => Err(AiError::Config(m.clone())),
            FakeReply::RateLimited(m) => Err(AiError::RateLimited(m.clone())),
            FakeReply::ApiError(m) => Err(AiError::Api(m.clone())),
        }
    }
}

struct Rule {
    needle: String,
    reply: FakeReply,
    delay: Duration,
}

/// Generator whose replies are chosen by the first rule whose needle occurs
/// in the prompt. Unmatched prompts fail with an API error unless a default
/// reply is set.
pub struct FakeGenerator {
    rules: Vec<Rule>,
    default_reply: Option<FakeReply>,
    calls: Mutex<Vec<(String, SamplingConfig)>>,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default_reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_prompt(self, needle: &str, reply: FakeReply) -> Self {
        self.on_prompt_delayed(needle, reply, Duration::ZERO)
    }

    pub fn on_prompt_delayed(mut self, needle: &str, reply: FakeReply, delay: Duration) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            reply,
            delay,
        });
        self
    }

    pub fn with_default(mut self, reply: FakeReply) -> Self {
        self.default_reply = Some(reply);
        self
    }

    /// Replies with a distinct well-formed narrative for each path.
    pub fn well_formed() -> Self {
        Self::new()
            .on_prompt(ALTERNATE_PROMPT_HINT, FakeReply::text(marker_response("alternate")))
            .on_prompt(CURRENT_PROMPT_HINT, FakeReply::text(marker_response("current")))
            .on_prompt(HEALTH_PROMPT_HINT, FakeReply::text("Service is healthy"))
    }

    pub fn calls(&self) -> Vec<(String, SamplingConfig)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for FakeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate_text(
        &self,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> Result<String, AiError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *sampling));

        let (reply, delay) = match self.rules.iter().find(|r| prompt.contains(&r.needle)) {
            Some(rule) => (Some(rule.reply.clone()), rule.delay),
            None => (self.default_reply.clone(), Duration::ZERO),
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Some(reply) => reply.resolve(),
            None => Err(AiError::Api("FakeGenerator: no reply registered for prompt".into())),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A marker-delimited response whose sections are tagged with `label`.
pub fn marker_response(label: &str) -> String {
    format!(
        "{YEAR_1_MARKER}\n{label} year one.\n\n\
         {YEAR_3_MARKER}\n{label} year three.\n\n\
         {YEAR_10_MARKER}\n{label} year ten.\n\n\
         {FUTURE_MESSAGE_MARKER}\n\"Here's what I'd tell you now: {label}.\""
    )
}

/// The narrative `marker_response(label)` parses to.
pub fn expected_narrative(label: &str) -> PathNarrative {
    PathNarrative {
        year1: format!("{label} year one."),
        year3: format!("{label} year three."),
        year10: format!("{label} year ten."),
        future_message: format!("Here's what I'd tell you now: {label}."),
    }
}

pub fn sample_raw_profile() -> RawProfile {
    serde_json::from_value(sample_profile_json()).expect("sample profile is valid JSON")
}

pub fn sample_profile_json() -> serde_json::Value {
    json!({
        "age": 28,
        "location": "Austin, TX",
        "profession": "Marketing coordinator at a mid-size firm",
        "traits": "Curious, risk-averse, values stability",
        "alternatePath": "What if I quit to become a full-time potter?"
    })
}

pub fn sample_profile() -> ProfileInput {
    ProfileInput {
        age: 28,
        location: "Austin, TX".into(),
        profession: "Marketing coordinator at a mid-size firm".into(),
        traits: "Curious, risk-averse, values stability".into(),
        alternate_path: "What if I quit to become a full-time potter?".into(),
    }
}

pub fn sample_result() -> SimulationResult {
    SimulationResult {
        alternate_path: expected_narrative("alternate"),
        current_path: expected_narrative("current"),
        metadata: SimulationMetadata {
            generated_at: Utc::now(),
            user_age: 28,
            alternate_decision: sample_profile().alternate_path,
        },
    }
}

/// A record for `user_id` created `minutes_ago` minutes before now.
pub fn saved_simulation(user_id: &str, minutes_ago: i64) -> SavedSimulation {
    let at = Utc::now() - chrono::Duration::minutes(minutes_ago);
    new_saved_simulation(user_id, &sample_profile(), &sample_result(), at)
}
