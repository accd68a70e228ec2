//! Car Insurance Records - API Server Binary
//!
//! Starts the HTTP API and the policy expiration sweeper.
//!
//! # Usage
//!
//! ```bash
//! API_DATABASE_URL=postgres://localhost/car_insurance cargo run --bin car-insurance-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_MAX_CONNECTIONS` - Database pool size (default: 10)
//! * `API_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `API_LOG_JSON` - Emit JSON log lines (default: false)
//! * `API_EXPIRATION_INTERVAL_SECS` - Seconds between expiration sweeps (default: 3600)
//! * `API_EXPIRATION_TIMEZONE` - IANA timezone of the expiration calendar (default: UTC)
//! * `API_CURRENCY` - Currency of claim amounts in histories (default: USD)

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_policy::{ExpirationSweeper, SweeperConfig};
use domain_vehicle::CarInsuranceService;
use infra_db::{
    create_pool, run_migrations, DatabaseConfig, PostgresClaimAdapter, PostgresPolicyAdapter,
    PostgresVehicleAdapter,
};
use interface_api::{config::ApiConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("failed to load configuration")?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        host = %config.host,
        port = config.port,
        currency = %config.currency,
        "Starting car insurance records API"
    );

    let pool = create_pool(
        DatabaseConfig::new(config.database_url.clone()).max_connections(config.max_connections),
    )
    .await
    .context("failed to connect to the database")?;

    run_migrations(&pool).await?;

    let service = CarInsuranceService::new(
        Arc::new(PostgresVehicleAdapter::new(pool.clone())),
        Arc::new(PostgresPolicyAdapter::new(pool.clone())),
        Arc::new(PostgresClaimAdapter::new(pool.clone())),
    )
    .with_currency(config.currency);

    let sweeper = ExpirationSweeper::new(
        service.policy_port(),
        SweeperConfig::default()
            .interval(config.expiration_interval())
            .timezone(config.expiration_timezone),
    )
    .spawn();

    let app = create_router(service);

    let listener = TcpListener::bind(config.server_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.server_addr()))?;
    tracing::info!(addr = %config.server_addr(), "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let stats = sweeper.shutdown().await;
    tracing::info!(
        cycles = stats.cycles,
        expired_policies = stats.notices,
        "Expiration sweeper stopped"
    );

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(config: &ApiConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the server returns.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
