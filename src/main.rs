use anyhow::Context;
use webbasic::interceptor::LogInterceptor;
use webbasic::lifecycle::shutdown_signal;
use webbasic::{AppConfig, ConfigService, build_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_service(&ConfigService::new())
        .context("Failed to load configuration")?;
    tracing::info!(server_name = %config.server_name, "Starting server...");

    let router = build_app(&config);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Initiating graceful shutdown...");
        })
        .await
        .context("Server error")?;

    LogInterceptor::destroy();
    tracing::info!("Server stopped");
    Ok(())
}
