use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::{bootstrap, config::AppConfig, routes, state::AppState};
use auth::SessionManager;
use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Attendify API service");

    let config = AppConfig::from_env()?;
    let sessions = SessionManager::new(&config.session_config())?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;
    bootstrap::ensure_admin(&pool, &config).await?;

    let bind_address = config.bind_address.clone();
    let app = routes::create_router(AppState::new(pool, sessions, config));

    let listener = TcpListener::bind(&bind_address).await?;
    info!("API service listening on {}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
