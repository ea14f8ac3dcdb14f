use std::sync::Arc;

use team_approvals_api::api::{self, AppState};
use team_approvals_api::config::{Config, StoreKind};
use team_approvals_api::domain::repositories::TeamRepository;
use team_approvals_api::infrastructure::database;
use team_approvals_api::infrastructure::repositories::{
    InMemoryTeamRepository, PostgresTeamRepository,
};
use team_approvals_api::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    telemetry::init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(store = ?config.store, "Configuration loaded");

    // Build the store; the pool is owned here and closed on shutdown
    let (team_repo, pool) = match config.store {
        StoreKind::Postgres => {
            let pool = database::create_pool(&config)?;
            if config.run_migrations {
                tracing::info!("Running database migrations...");
                database::run_migrations(&pool).await?;
                tracing::info!("Database migrations applied");
            }
            let repo: Arc<dyn TeamRepository> = Arc::new(PostgresTeamRepository::new(pool.clone()));
            (repo, Some(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory team store; data is lost on restart");
            let repo: Arc<dyn TeamRepository> = Arc::new(InMemoryTeamRepository::new());
            (repo, None)
        }
    };

    let app = api::router(AppState::new(team_repo));

    // Start server
    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
