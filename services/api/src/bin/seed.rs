//! Reset the database and load the sample data set

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::bootstrap;
use common::database::{DatabaseConfig, init_pool, run_migrations};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    run_migrations(&pool).await?;

    let summary = bootstrap::seed_sample_data(&pool).await?;
    info!(
        "Database seeded: {} courses, {} students, {} users, {} attendance entries",
        summary.courses, summary.students, summary.users, summary.attendance
    );

    Ok(())
}
