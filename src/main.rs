// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use clap::Parser;
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::series_loader::SeriesLoader;
use crate::infrastructure::config::{load_app_config, ConfigOverrides, DEFAULT_CONFIG_FILE};
use crate::infrastructure::file_source::FileSampleSource;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

/// Web dashboard for the NPH soil moisture sensor
#[derive(Parser, Debug)]
#[command(name = "moisture-dashboard", version, about)]
struct Cli {
    /// Path to the CSV file produced by the sensor server
    path: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8050
    #[arg(long)]
    bind: Option<String>,

    /// Config file, without extension
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("moisture_dashboard=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let overrides = ConfigOverrides {
        data_path: cli.path,
        bind: cli.bind,
    };
    let config = load_app_config(&cli.config, &overrides)?;

    // Create source (infrastructure layer)
    let source = Arc::new(FileSampleSource::new(config.data.path.clone()));

    // Create services (application layer)
    let dashboard_service = DashboardService::new(SeriesLoader::new(source));

    let state = AppState {
        dashboard_service,
        settings: config.dashboard,
    };

    // Build router (presentation layer)
    let router = build_router(state);

    let addr = config.server.bind;
    tracing::info!(
        "Serving moisture dashboard for {} on http://{}",
        config.data.path.display(),
        addr
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Moisture dashboard shut down");
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
