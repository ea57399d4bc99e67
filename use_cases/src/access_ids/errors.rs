use entities::locations::LocationCodeError;
use std::fmt::{Display, Formatter};

/// The four dependent lookups, in the order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupStage {
    Location,
    Subscription,
    Member,
    AccessToken,
}

impl Display for LookupStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LookupStage::Location => "Parcs_Locations",
            LookupStage::Subscription => "Subscriptions",
            LookupStage::Member => "Members",
            LookupStage::AccessToken => "Tokens",
        };
        f.write_str(name)
    }
}

/// Stages whose empty result ends the resolution.
/// An empty token stage is a successful, empty answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotFoundStage {
    Location,
    Subscription,
    Member,
}

impl NotFoundStage {
    pub fn message(&self) -> &'static str {
        match self {
            NotFoundStage::Location => "Location not found",
            NotFoundStage::Subscription => "Subscription not found",
            NotFoundStage::Member => "Members not found",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ResolveAccessIdsError {
    #[error("Invalid location code: {0}")]
    Validation(#[from] LocationCodeError),
    #[error("{}", .0.message())]
    NotFound(NotFoundStage),
    #[error("{stage} query failed: {source:#}")]
    Query {
        stage: LookupStage,
        source: anyhow::Error,
    },
    #[error("Failed to open a database session: {0:#}")]
    SessionUnavailable(#[source] anyhow::Error),
}

#[derive(thiserror::Error, Debug)]
#[error("Failed to release the database session: {0:#}")]
pub struct ResourceReleaseError(#[source] pub anyhow::Error);
