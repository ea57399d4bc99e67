use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;
use std::sync::Arc;

/// Non-secret coordinates of the backing store, safe to echo back to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConnectionDetails {
    pub server: String,
    pub database: String,
    pub user: String,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConnectionProbeRepo: Send + Sync {
    fn connection_details(&self) -> ConnectionDetails;

    /// Runs `SELECT 1` and returns the values it produced.
    async fn probe(&self) -> anyhow::Result<Vec<i32>>;
}

#[derive(Debug)]
pub struct ConnectionReport {
    pub details: ConnectionDetails,
    pub test_query: Vec<i32>,
}

#[derive(thiserror::Error, Debug)]
#[error("Database connection test failed")]
pub struct ConnectionTestError {
    pub details: ConnectionDetails,
    #[source]
    pub source: anyhow::Error,
}

#[async_trait]
pub trait ConnectionProbeInteractor: Send + Sync {
    async fn test_connection(&self) -> Result<ConnectionReport, ConnectionTestError>;

    async fn is_healthy(&self) -> bool {
        self.test_connection().await.is_ok()
    }
}

pub struct ConnectionProbeInteractorImpl {
    repo: Arc<dyn ConnectionProbeRepo>,
}

impl ConnectionProbeInteractorImpl {
    pub fn new(repo: Arc<dyn ConnectionProbeRepo>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ConnectionProbeInteractor for ConnectionProbeInteractorImpl {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn test_connection(&self) -> Result<ConnectionReport, ConnectionTestError> {
        let details = self.repo.connection_details();
        tracing::info!(
            server = %details.server,
            database = %details.database,
            user = %details.user,
            "Testing database connection"
        );
        match self.repo.probe().await {
            Ok(test_query) => Ok(ConnectionReport {
                details,
                test_query,
            }),
            Err(source) => Err(ConnectionTestError { details, source }),
        }
    }
}
