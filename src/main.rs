use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tank_dashboard::common::AppState;
use tank_dashboard::config::Config;
use tank_dashboard::monitor::MonitorClient;
use tank_dashboard::polling::PollingController;
use tank_dashboard::routes;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (LOG_FORMAT=json for machine-readable output)
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tank_dashboard=debug".into()),
        )
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .init();

    tracing::info!("Starting tank-dashboard...");

    // Load configuration (fail-fast)
    let config = Config::from_env()?;
    tracing::info!(
        monitor = %config.monitor_base_url,
        host = %config.dashboard_host,
        port = config.dashboard_port,
        "Configuration loaded"
    );

    let monitor = MonitorClient::new(&config)?;

    // Chart is initialized here, before the first cycle runs
    let state = AppState::new(config.clone(), monitor);

    let pollers = PollingController::start(&state);

    let app = routes::build_router(state);

    // Start server with graceful shutdown
    let addr = config.bind_address();
    tracing::info!(address = %addr, "Starting dashboard server");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pollers.stop();
    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}
