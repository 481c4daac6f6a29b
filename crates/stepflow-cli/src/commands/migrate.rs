//! `migrate` command — apply pending database migrations.

use stepflow_core::config::AppConfig;
use stepflow_core::error::AppError;
use stepflow_core::result::AppResult;

/// Connect and run all pending migrations.
pub async fn run(config: &AppConfig) -> AppResult<()> {
    if config.database.provider != "postgres" {
        return Err(AppError::configuration(format!(
            "Migrations only apply to the postgres provider (configured: '{}')",
            config.database.provider
        )));
    }

    let pool = stepflow_database::connection::create_pool(&config.database).await?;
    stepflow_database::migration::run_migrations(&pool).await?;

    println!("Migrations applied");
    Ok(())
}
