//! Kinship HTTP server.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kinship::bootstrap::{build_router, generative_model};
use kinship::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let model = generative_model(&config.ai)?;
    match &model {
        Some(model) => {
            let info = model.provider_info();
            tracing::info!(
                provider = %info.name,
                text_model = %info.text_model,
                image_model = %info.image_model,
                "Generative model configured"
            );
        }
        None => tracing::warn!("No Gemini API key configured; serving fallback content"),
    }

    let app = build_router(&config, model);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Kinship listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
