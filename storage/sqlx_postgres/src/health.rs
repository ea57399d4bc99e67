use crate::repository::Repository;
use anyhow::Context;
use async_trait::async_trait;
use use_cases::database_health::{ConnectionDetails, ConnectionProbeRepo};

#[async_trait]
impl ConnectionProbeRepo for Repository {
    fn connection_details(&self) -> ConnectionDetails {
        self.details().clone()
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn probe(&self) -> anyhow::Result<Vec<i32>> {
        sqlx::query_scalar::<_, i32>("SELECT 1 AS test")
            .fetch_all(self.pool())
            .await
            .context("Failed to run connection test query")
    }
}
