use crate::access_ids::{ResolveAccessIdsInteractor, ResolveAccessIdsInteractorImpl};
use crate::database_health::{ConnectionProbeInteractor, ConnectionProbeInteractorImpl};
use crate::repositories::Repository;
use crate::schema::{SchemaInteractor, SchemaInteractorImpl};
use crate::scores::{ScoresInteractor, ScoresInteractorImpl};
use std::sync::Arc;

pub mod access_ids;
pub mod database_health;
mod repositories;
pub mod schema;
pub mod scores;

pub trait App: Send + Sync {
    fn access_ids(&self) -> &dyn ResolveAccessIdsInteractor;
    fn connection_probe(&self) -> &dyn ConnectionProbeInteractor;
    fn schema(&self) -> &dyn SchemaInteractor;
    fn scores(&self) -> &dyn ScoresInteractor;
}

pub struct AppImpl {
    access_ids: Arc<dyn ResolveAccessIdsInteractor>,
    connection_probe: Arc<dyn ConnectionProbeInteractor>,
    schema: Arc<dyn SchemaInteractor>,
    scores: Arc<dyn ScoresInteractor>,
}

impl App for AppImpl {
    fn access_ids(&self) -> &dyn ResolveAccessIdsInteractor {
        self.access_ids.as_ref()
    }

    fn connection_probe(&self) -> &dyn ConnectionProbeInteractor {
        self.connection_probe.as_ref()
    }

    fn schema(&self) -> &dyn SchemaInteractor {
        self.schema.as_ref()
    }

    fn scores(&self) -> &dyn ScoresInteractor {
        self.scores.as_ref()
    }
}

impl AppImpl {
    pub fn new<R: Repository + 'static>(repo: R) -> Self {
        let repository = Arc::new(repo);
        let access_ids = ResolveAccessIdsInteractorImpl::new(repository.clone());
        let connection_probe = ConnectionProbeInteractorImpl::new(repository.clone());
        let schema = SchemaInteractorImpl::new(repository.clone());
        let scores = ScoresInteractorImpl::new(repository);

        Self {
            access_ids: Arc::new(access_ids),
            connection_probe: Arc::new(connection_probe),
            schema: Arc::new(schema),
            scores: Arc::new(scores),
        }
    }
}
