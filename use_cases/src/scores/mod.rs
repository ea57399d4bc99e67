use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::scores::{PlayerName, Score, ScoreId, ScoreInput};
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;

/// An unvalidated score submission as received from a client.
#[derive(Clone, Debug, Default)]
pub struct ScoreRequest {
    pub player: Option<String>,
    pub score: Option<i32>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(thiserror::Error, Debug)]
pub enum ScoresError {
    #[error("Player and score are required")]
    Validation,
    #[error("Score not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl TryFrom<ScoreRequest> for ScoreInput {
    type Error = ScoresError;

    fn try_from(value: ScoreRequest) -> Result<Self, Self::Error> {
        let player = value
            .player
            .ok_or(ScoresError::Validation)
            .and_then(|player| PlayerName::try_from(player).map_err(|_| ScoresError::Validation))?;
        let score = value.score.ok_or(ScoresError::Validation)?;
        Ok(ScoreInput {
            player,
            score,
            date: value.date,
        })
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ScoresRepo: Send + Sync {
    async fn list_scores(&self) -> anyhow::Result<Vec<Score>>;

    async fn find_score(&self, id: ScoreId) -> anyhow::Result<Option<Score>>;

    async fn create_score(&self, input: ScoreInput) -> anyhow::Result<Score>;

    async fn update_score(&self, id: ScoreId, input: ScoreInput) -> anyhow::Result<Option<Score>>;

    async fn delete_score(&self, id: ScoreId) -> anyhow::Result<Option<Score>>;
}

#[async_trait]
pub trait ScoresInteractor: Send + Sync {
    async fn list(&self) -> Result<Vec<Score>, ScoresError>;

    async fn get(&self, id: ScoreId) -> Result<Score, ScoresError>;

    async fn create(&self, request: ScoreRequest) -> Result<Score, ScoresError>;

    async fn update(&self, id: ScoreId, request: ScoreRequest) -> Result<Score, ScoresError>;

    async fn delete(&self, id: ScoreId) -> Result<Score, ScoresError>;
}

pub struct ScoresInteractorImpl {
    repo: Arc<dyn ScoresRepo>,
}

impl ScoresInteractorImpl {
    pub fn new(repo: Arc<dyn ScoresRepo>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ScoresInteractor for ScoresInteractorImpl {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn list(&self) -> Result<Vec<Score>, ScoresError> {
        let scores = self.repo.list_scores().await?;
        tracing::info!(count = scores.len(), "Fetched scores");
        Ok(scores)
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn get(&self, id: ScoreId) -> Result<Score, ScoresError> {
        self.repo
            .find_score(id)
            .await?
            .ok_or(ScoresError::NotFound)
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn create(&self, request: ScoreRequest) -> Result<Score, ScoresError> {
        let input = ScoreInput::try_from(request)?;
        let score = self.repo.create_score(input).await?;
        tracing::info!(id = %score.id, "Score created");
        Ok(score)
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn update(&self, id: ScoreId, request: ScoreRequest) -> Result<Score, ScoresError> {
        let input = ScoreInput::try_from(request)?;
        self.repo
            .update_score(id, input)
            .await?
            .ok_or(ScoresError::NotFound)
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn delete(&self, id: ScoreId) -> Result<Score, ScoresError> {
        self.repo
            .delete_score(id)
            .await?
            .ok_or(ScoresError::NotFound)
    }
}
