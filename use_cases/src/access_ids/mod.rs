mod errors;

pub use errors::{LookupStage, NotFoundStage, ResolveAccessIdsError, ResourceReleaseError};

use async_trait::async_trait;
use entities::access::AccessIds;
use entities::locations::{LocationCode, LocationId};
use entities::members::{Member, MemberId};
use entities::subscriptions::SubscriptionId;
use itertools::Itertools;
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;

/// Opens a scoped session against the backing store. One session serves one resolution.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccessLookupRepo: Send + Sync {
    async fn open_session(&self) -> anyhow::Result<Box<dyn AccessLookupSession>>;
}

/// Dropping a session must hand its connection back, so a cancelled request never leaks one.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccessLookupSession: Send {
    async fn find_location_id(&mut self, code: LocationCode)
        -> anyhow::Result<Option<LocationId>>;

    async fn find_subscription_ids(
        &mut self,
        location_id: LocationId,
    ) -> anyhow::Result<Vec<SubscriptionId>>;

    async fn find_members(
        &mut self,
        subscription_ids: &[SubscriptionId],
    ) -> anyhow::Result<Vec<Member>>;

    /// Raw `accessId` column values; filtering and ordering happen in the resolver.
    async fn find_access_ids(&mut self, member_ids: &[MemberId])
        -> anyhow::Result<Vec<Option<String>>>;

    async fn release(&mut self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ResolveAccessIdsInteractor: Send + Sync {
    async fn resolve(
        &self,
        location_code: Option<String>,
    ) -> Result<AccessIds, ResolveAccessIdsError>;
}

pub struct ResolveAccessIdsInteractorImpl {
    repo: Arc<dyn AccessLookupRepo>,
}

impl ResolveAccessIdsInteractorImpl {
    pub fn new(repo: Arc<dyn AccessLookupRepo>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ResolveAccessIdsInteractor for ResolveAccessIdsInteractorImpl {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn resolve(
        &self,
        location_code: Option<String>,
    ) -> Result<AccessIds, ResolveAccessIdsError> {
        let code = LocationCode::try_from(location_code.as_deref())?;

        let mut session = self
            .repo
            .open_session()
            .await
            .map_err(ResolveAccessIdsError::SessionUnavailable)?;

        let outcome = run_stages(session.as_mut(), code).await;

        if let Err(err) = session.release().await {
            let err = ResourceReleaseError(err);
            tracing::warn!(
                error = %err,
                resolution_failed = outcome.is_err(),
                "Database session was not released cleanly"
            );
        }

        outcome
    }
}

async fn run_stages(
    session: &mut dyn AccessLookupSession,
    code: LocationCode,
) -> Result<AccessIds, ResolveAccessIdsError> {
    let location_id = session
        .find_location_id(code)
        .await
        .map_err(query_failed(LookupStage::Location))?
        .filter(LocationId::is_assigned)
        .ok_or(ResolveAccessIdsError::NotFound(NotFoundStage::Location))?;
    tracing::info!(%location_id, "Resolved location");

    let subscription_ids = session
        .find_subscription_ids(location_id)
        .await
        .map_err(query_failed(LookupStage::Subscription))
        .and_then(require_rows(NotFoundStage::Subscription))?;
    let subscription_ids = subscription_ids.into_iter().unique().collect_vec();
    tracing::info!(count = subscription_ids.len(), "Resolved subscriptions");

    let members = session
        .find_members(&subscription_ids)
        .await
        .map_err(query_failed(LookupStage::Member))
        .and_then(require_rows(NotFoundStage::Member))?;
    let member_ids = members.iter().map(|member| member.id).unique().collect_vec();
    tracing::info!(count = member_ids.len(), "Resolved members");

    let access_ids: AccessIds = session
        .find_access_ids(&member_ids)
        .await
        .map_err(query_failed(LookupStage::AccessToken))?
        .into_iter()
        .collect();
    tracing::info!(count = access_ids.len(), "Resolved access ids");

    Ok(access_ids)
}

fn query_failed(stage: LookupStage) -> impl FnOnce(anyhow::Error) -> ResolveAccessIdsError {
    move |source| {
        tracing::error!(%stage, error = %format!("{source:#}"), "Lookup stage failed");
        ResolveAccessIdsError::Query { stage, source }
    }
}

fn require_rows<T>(
    stage: NotFoundStage,
) -> impl FnOnce(Vec<T>) -> Result<Vec<T>, ResolveAccessIdsError> {
    move |rows| {
        if rows.is_empty() {
            return Err(ResolveAccessIdsError::NotFound(stage));
        }
        Ok(rows)
    }
}
