use chrono::{DateTime, Utc};
use serde::Serialize;
use shared_kernel::{integer_key, non_empty_string};

integer_key!(ScoreId);
non_empty_string!(PlayerName);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Score {
    pub id: ScoreId,
    pub player: String,
    pub score: i32,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated score submission. `date` falls back to now on create
/// and to the stored date on update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreInput {
    pub player: PlayerName,
    pub score: i32,
    pub date: Option<DateTime<Utc>>,
}
