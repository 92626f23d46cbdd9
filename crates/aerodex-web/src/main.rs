use std::process::ExitCode;

use aerodex_core::FacilityLookup;
use aerodex_web::{app, AppState, ServerError, Settings};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Settings::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %error, "aerodex stopped");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(settings: Settings) -> Result<(), ServerError> {
    let config = settings.lookup_config()?;
    let lookup = FacilityLookup::from_config(&config);
    tracing::info!(
        provider = lookup.provider_name(),
        base_url = %config.upstream.base_url,
        "lookup service configured"
    );

    let listener = tokio::net::TcpListener::bind(&settings.bind)
        .await
        .map_err(|source| ServerError::Bind {
            address: settings.bind.clone(),
            source,
        })?;
    tracing::info!(address = %settings.bind, "listening");

    axum::serve(listener, app(AppState::new(lookup)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %error, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
