use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use aurora_db::PgActivityStore;
use aurora_events::{ActivityHub, ActivityRecorder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aurora_api::config::ServerConfig;
use aurora_api::router::build_app_router;
use aurora_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aurora_api=debug,aurora_events=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        protected_prefix = %config.gate.protected_prefix,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = aurora_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    aurora_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    aurora_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Activity feed ---
    let hub = Arc::new(ActivityHub::new());
    let recorder = Arc::new(ActivityRecorder::new(
        Arc::new(PgActivityStore::new(pool.clone())),
        Arc::clone(&hub),
    ));
    tracing::info!("Activity recorder created");

    // --- App state ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState {
        config: Arc::new(config),
        recorder,
    };
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // Live feeds are closed as soon as shutdown starts so open sockets do not
    // hold the drain open.
    let shutdown_hub = Arc::clone(&hub);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            shutdown_hub.close_all().await;
        })
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    let _ = tokio::time::timeout(Duration::from_secs(5), pool.close()).await;
    tracing::info!("Database pool closed");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM (on Unix) to initiate graceful
/// shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
