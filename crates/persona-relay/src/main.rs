use anyhow::{anyhow, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use persona_relay::config::Settings;
use persona_relay::persona::Persona;
use persona_relay::router::build_router;
use persona_relay::services::{ConversationRelay, LlmProvider, LlmService};
use persona_relay::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,persona_relay=debug".to_string()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .init();

    info!("🚀 Starting persona relay...");

    // Load configuration
    let settings = Settings::load()?;
    info!("✅ Configuration loaded");

    let persona = Persona::by_name(&settings.conversation.persona)
        .ok_or_else(|| anyhow!("Unknown persona '{}'", settings.conversation.persona))?;

    let llm_provider: Option<Box<dyn LlmProvider>> = match settings.provider.api_key.clone() {
        Some(api_key) => {
            let service = LlmService::new(settings.provider.clone(), api_key)?;
            info!(
                "✅ Provider configured: model={}, base_url={}",
                settings.provider.model, settings.provider.base_url
            );
            Some(Box::new(service))
        }
        None => {
            warn!("No OPENAI_API_KEY found (environment or .env), serving offline replies only");
            None
        }
    };

    let relay = Arc::new(ConversationRelay::new(
        llm_provider,
        persona,
        &settings.conversation,
    ));
    relay
        .cache()
        .spawn_sweeper(Duration::from_secs(settings.conversation.sweep_interval_seconds));
    info!("✅ Persona '{}' ready", persona.name());

    let app = build_router(AppState::new(relay), settings.server.static_dir.as_deref());

    // Server address
    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    info!("🎯 Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
