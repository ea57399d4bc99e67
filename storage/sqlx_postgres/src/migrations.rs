use crate::configuration::DbSettings;
use anyhow::Context;
use sqlx::postgres::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct MigrationManager {
    pg_pool: Arc<PgPool>,
}

impl MigrationManager {
    pub fn pool(&self) -> &PgPool {
        self.pg_pool.as_ref()
    }

    pub async fn new(settings: &DbSettings) -> anyhow::Result<Self> {
        let pg_pool = PgPool::connect_with(settings.with_db())
            .await
            .with_context(|| format!("Failed to connect to DB {}", settings.database_name()))
            .map(Arc::new)?;

        Ok(Self { pg_pool })
    }

    #[tracing::instrument(skip(self), level = "info")]
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!()
            .run(self.pool())
            .await
            .context("Failed to run migration")?;
        tracing::info!("Migrations applied");
        Ok(())
    }
}
