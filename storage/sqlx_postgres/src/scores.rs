use crate::repository::Repository;
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::scores::{Score, ScoreId, ScoreInput};
use sqlx::FromRow;
use use_cases::scores::ScoresRepo;

#[derive(FromRow)]
struct ScoreRow {
    id: i64,
    player: String,
    score: i32,
    date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ScoreRow> for Score {
    fn from(row: ScoreRow) -> Self {
        Score {
            id: ScoreId::from(row.id),
            player: row.player,
            score: row.score,
            date: row.date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ScoresRepo for Repository {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn list_scores(&self) -> anyhow::Result<Vec<Score>> {
        let rows = sqlx::query_as::<_, ScoreRow>(
            r#"
            SELECT id, player, score, date, created_at, updated_at
            FROM scores
            ORDER BY score DESC, date DESC
            "#,
        )
        .fetch_all(self.pool())
        .await
        .context("Failed to fetch scores")?;

        Ok(rows.into_iter().map(Score::from).collect())
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_score(&self, id: ScoreId) -> anyhow::Result<Option<Score>> {
        let row = sqlx::query_as::<_, ScoreRow>(
            r#"
            SELECT id, player, score, date, created_at, updated_at
            FROM scores
            WHERE id = $1
            "#,
        )
        .bind(id.inner())
        .fetch_optional(self.pool())
        .await
        .with_context(|| format!("Failed to fetch score {id}"))?;

        Ok(row.map(Score::from))
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn create_score(&self, input: ScoreInput) -> anyhow::Result<Score> {
        let row = sqlx::query_as::<_, ScoreRow>(
            r#"
            INSERT INTO scores (player, score, date)
            VALUES ($1, $2, COALESCE($3, now()))
            RETURNING id, player, score, date, created_at, updated_at
            "#,
        )
        .bind(input.player.inner())
        .bind(input.score)
        .bind(input.date)
        .fetch_one(self.pool())
        .await
        .context("Failed to insert score")?;

        Ok(row.into())
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn update_score(&self, id: ScoreId, input: ScoreInput) -> anyhow::Result<Option<Score>> {
        let row = sqlx::query_as::<_, ScoreRow>(
            r#"
            UPDATE scores
            SET player = $2,
                score = $3,
                date = COALESCE($4, date),
                updated_at = now()
            WHERE id = $1
            RETURNING id, player, score, date, created_at, updated_at
            "#,
        )
        .bind(id.inner())
        .bind(input.player.inner())
        .bind(input.score)
        .bind(input.date)
        .fetch_optional(self.pool())
        .await
        .with_context(|| format!("Failed to update score {id}"))?;

        Ok(row.map(Score::from))
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn delete_score(&self, id: ScoreId) -> anyhow::Result<Option<Score>> {
        let row = sqlx::query_as::<_, ScoreRow>(
            r#"
            DELETE FROM scores
            WHERE id = $1
            RETURNING id, player, score, date, created_at, updated_at
            "#,
        )
        .bind(id.inner())
        .fetch_optional(self.pool())
        .await
        .with_context(|| format!("Failed to delete score {id}"))?;

        Ok(row.map(Score::from))
    }
}
