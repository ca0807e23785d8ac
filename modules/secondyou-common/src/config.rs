use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => bail!("unknown APP_ENV: {other}"),
        }
    }
}

/// Which text-generation provider backs the simulation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    Gemini,
    Claude,
}

impl std::str::FromStr for AiProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "gemini" => Ok(AiProvider::Gemini),
            "claude" | "anthropic" => Ok(AiProvider::Claude),
            other => bail!("unknown AI_PROVIDER: {other}"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    // AI provider
    pub ai_provider: AiProvider,
    pub gemini_model: String,
    pub claude_model: String,
    pub generation_timeout: Duration,

    // Rate limiting
    pub rate_limit_max: usize,
    pub rate_limit_window: Duration,

    // CORS
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// Provider API keys are read by the providers themselves, so a missing key
    /// does not fail startup.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("PORT must be a number")?,
            environment: env::var("APP_ENV").unwrap_or_default().parse()?,
            ai_provider: env::var("AI_PROVIDER").unwrap_or_default().parse()?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            claude_model: env::var("CLAUDE_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string()),
            generation_timeout: Duration::from_secs(
                parse_or("GENERATION_TIMEOUT_SECS", 60)?,
            ),
            rate_limit_max: parse_or("RATE_LIMIT_MAX", 10)?,
            rate_limit_window: Duration::from_secs(parse_or("RATE_LIMIT_WINDOW_SECS", 900)?),
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: Environment::Development,
            ai_provider: AiProvider::Gemini,
            gemini_model: "gemini-2.5-flash".to_string(),
            claude_model: "claude-sonnet-4-20250514".to_string(),
            generation_timeout: Duration::from_secs(60),
            rate_limit_max: 10,
            rate_limit_window: Duration::from_secs(900),
            allowed_origins: Vec::new(),
        }
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number")),
        _ => Ok(default),
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
