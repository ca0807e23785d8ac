use std::sync::Arc;

use ai_client::{Claude, Gemini, TextGenerator};
use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use secondyou_api::{build_router, AppState};
use secondyou_common::{AiProvider, Config, Environment};
use secondyou_core::InMemorySimulationStore;

fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if environment.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_generator(config: &Config) -> Arc<dyn TextGenerator> {
    match config.ai_provider {
        AiProvider::Gemini => {
            let gemini = Gemini::from_env(config.gemini_model.clone());
            if !gemini.is_configured() {
                warn!("GEMINI_API_KEY is not set; simulations will fail until it is configured");
            }
            Arc::new(gemini)
        }
        AiProvider::Claude => {
            let claude = Claude::from_env(config.claude_model.clone());
            if !claude.is_configured() {
                warn!("ANTHROPIC_API_KEY is not set; simulations will fail until it is configured");
            }
            Arc::new(claude)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.environment);

    let generator = build_generator(&config);
    let store = Arc::new(InMemorySimulationStore::new());
    let state = Arc::new(AppState::new(&config, generator, store));
    let app = build_router(state, &config.allowed_origins);

    let addr = format!("{}:{}", config.host, config.port);
    info!(
        environment = config.environment.as_str(),
        provider = ?config.ai_provider,
        "Second You API starting on {addr}"
    );
    info!("Health check available at http://{addr}/health");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
