use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    /// Provider answered with a quota or throttling signal (HTTP 429).
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl AiError {
    /// Build the error for a non-success HTTP status from a provider.
    pub fn from_status(provider: &str, status: reqwest::StatusCode, body: &str) -> Self {
        let message = format!("{provider} API error ({status}): {body}");
        match status {
            reqwest::StatusCode::TOO_MANY_REQUESTS => AiError::RateLimited(message),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                AiError::Config(message)
            }
            _ => AiError::Api(message),
        }
    }
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        AiError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for AiError {
    fn from(e: serde_json::Error) -> Self {
        AiError::Parse(e.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for AiError {
    fn from(e: reqwest::header::InvalidHeaderValue) -> Self {
        AiError::Config(format!("invalid header value: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_429_is_rate_limited() {
        let err =
            AiError::from_status("Gemini", reqwest::StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(matches!(err, AiError::RateLimited(_)));
    }

    #[test]
    fn status_401_is_config() {
        let err = AiError::from_status("Claude", reqwest::StatusCode::UNAUTHORIZED, "bad key");
        assert!(matches!(err, AiError::Config(_)));
    }

    #[test]
    fn other_status_is_api_error_with_body() {
        let err = AiError::from_status("Gemini", reqwest::StatusCode::BAD_GATEWAY, "upstream");
        assert!(matches!(err, AiError::Api(_)));
        assert!(err.to_string().contains("upstream"));
    }
}
