use warden_server::{AppState, ServerError, build_router, guard_config, logger};

use warden_auth::AuthGuard;
use warden_config::Config;
use warden_db::SqliteSessionStore;

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;

const DATABASE_MAX_CONNECTIONS: u32 = 10;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; real deployments set the environment directly
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let log_dir = Config::config_dir()?.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir).map_err(|e| ServerError::Io {
            path: log_dir.display().to_string(),
            source: e,
        })?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting warden-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics {
            message: e.to_string(),
        })?;

    // Initialize database pool (runs migrations)
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = warden_db::open_pool(&database_path, DATABASE_MAX_CONNECTIONS).await?;
    info!("Database ready");

    // validate() guarantees the secret is present
    let secret = config.auth.jwt_secret.clone().unwrap_or_default();
    let store = Arc::new(SqliteSessionStore::new(pool.clone()));
    let guard = Arc::new(AuthGuard::new(
        secret.as_bytes(),
        store,
        guard_config(&config),
    ));
    guard.start_sweeper();

    let app = build_router(AppState {
        guard: guard.clone(),
        pool,
        metrics,
        trust_forwarded_for: config.server.trust_forwarded_for,
    });

    // Create TCP listener
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
                std::future::pending::<()>().await;
            }
        }
    })
    .await?;

    guard.shutdown().await;
    info!("Graceful shutdown complete");

    Ok(())
}
