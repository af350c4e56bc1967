use anyhow::{Context, Result};
use clap::Parser;
use dictation_bridge::{create_router, AppState, Config, HttpTokenValidator, WebSocketEngine};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dictation-bridge",
    about = "Bridge legacy dictation clients to a streaming recognition engine"
)]
struct Cli {
    /// Path to the configuration file (extension optional)
    #[arg(short, long, default_value = "config/dictation-bridge")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = Config::load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config))?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Token validation: {}", cfg.auth.url);
    info!(
        "Recognition engine: {} (model {})",
        cfg.engine.url, cfg.engine.model
    );

    let validator = HttpTokenValidator::from_config(&cfg.auth)
        .context("failed to build token validation client")?;
    let engine = WebSocketEngine::from_config(&cfg.engine);

    let state = AppState::new(Arc::new(validator), Arc::new(engine))
        .with_model(cfg.engine.model.clone());
    let app = create_router(state);

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
