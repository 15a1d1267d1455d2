use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sansure::api::{create_router, AppState};
use sansure::config::Config;

#[derive(Parser)]
#[command(name = "sansure")]
#[command(about = "AI backend for rural sanitation trust ratings")]
struct Args {
    /// Bind address, overrides SANSURE_HOST
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides SANSURE_PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sansure=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    match config.llm.credential() {
        Ok(_) => tracing::info!(
            "LLM provider: {} (vision: {}, text: {})",
            config.llm.base_url,
            config.llm.vision_model,
            config.llm.text_model
        ),
        Err(e) => tracing::warn!("{}. Every mode will fail until it is configured.", e),
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = create_router(AppState::new(config));

    tracing::info!("SanSure starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  API docs:     http://{}/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
