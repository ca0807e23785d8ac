use thiserror::Error;

/// Every way a simulation request can fail, as seen by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Malformed, out-of-range or flagged input. The message is user-facing.
    #[error("{0}")]
    Validation(String),

    /// The generation client is unusable (missing or rejected credential).
    #[error("AI service misconfigured: {0}")]
    Configuration(String),

    /// Provider-side quota or throttling signal.
    #[error("AI service rate limited: {0}")]
    RateLimited(String),

    #[error("AI generation failed: {0}")]
    Generation(String),

    #[error("Failed to parse AI response: {0}")]
    Parse(String),
}

impl SimulationError {
    /// Whether retrying the same request later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SimulationError::RateLimited(_) | SimulationError::Generation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_verbatim() {
        let err = SimulationError::Validation("Age must be a number between 13 and 100".into());
        assert_eq!(err.to_string(), "Age must be a number between 13 and 100");
    }

    #[test]
    fn configuration_is_not_retryable() {
        assert!(!SimulationError::Configuration("no key".into()).is_retryable());
        assert!(!SimulationError::Validation("bad".into()).is_retryable());
        assert!(SimulationError::RateLimited("quota".into()).is_retryable());
    }
}
