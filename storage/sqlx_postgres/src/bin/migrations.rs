use serde::Deserialize;
use shared_kernel::configuration::{config, Environment};
use shared_kernel::telemetry::config_telemetry;
use sqlx_postgres::configuration::DbSettings;
use sqlx_postgres::migrations::MigrationManager;

#[derive(Deserialize)]
struct Settings {
    database: DbSettings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config_telemetry("migrations", false)?;

    let environment = Environment::from_env()?;
    let settings: Settings = config(environment)?;
    tracing::info!(
        environment = environment.as_str(),
        database = settings.database.database_name(),
        "Running migrations"
    );

    MigrationManager::new(&settings.database)
        .await?
        .migrate()
        .await
}
