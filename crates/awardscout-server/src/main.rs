mod api;
mod middleware;

use std::sync::Arc;

use awardscout_insight::{GeminiClient, GenerativeModel};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = awardscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let catalog = awardscout_core::load_catalog(&config.catalog_path)?;
    let model = GeminiClient::from_config(&config)?;
    if !model.is_configured() {
        tracing::warn!("GEMINI_API_KEY not set; chance analysis requests will return 503");
    }

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        awards = catalog.awards.len(),
        model = %config.gemini_model,
        "starting awardscout server"
    );

    let state = AppState {
        model: Arc::new(model),
        catalog: Arc::new(catalog),
    };
    let app = build_app(state, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
