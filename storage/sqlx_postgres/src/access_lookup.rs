use crate::repository::Repository;
use anyhow::Context;
use async_trait::async_trait;
use entities::locations::{LocationCode, LocationId};
use entities::members::{Member, MemberId};
use entities::subscriptions::SubscriptionId;
use itertools::Itertools;
use sqlx::pool::PoolConnection;
use sqlx::{Connection, FromRow, PgConnection, Postgres};
use use_cases::access_ids::{AccessLookupRepo, AccessLookupSession};

// Codes that are blank, placeholders or not integers are skipped before the cast is attempted.
const FIND_LOCATION_ID: &str = r#"
    SELECT location_id
    FROM parcs_locations
    WHERE location_code IS NOT NULL
      AND lower(btrim(location_code)) NOT IN ('', 'null', 'undefined')
      AND CASE
            WHEN btrim(location_code) ~ '^[+-]?[0-9]+$'
            THEN CAST(btrim(location_code) AS NUMERIC)
          END = $1
    ORDER BY location_id
    LIMIT 1
"#;

const FIND_SUBSCRIPTION_IDS: &str = r#"
    SELECT id
    FROM subscriptions
    WHERE location_platform_id = $1
    ORDER BY id
"#;

const FIND_MEMBERS: &str = r#"
    SELECT id, first_name, last_name, email
    FROM members
    WHERE subscription_id = ANY($1)
    ORDER BY id
"#;

const FIND_ACCESS_IDS: &str = r#"
    SELECT DISTINCT access_id::text AS access_id
    FROM tokens
    WHERE member_id = ANY($1)
      AND access_id IS NOT NULL
      AND lower(btrim(access_id::text)) NOT IN ('', 'null', 'undefined')
    ORDER BY access_id
"#;

#[derive(FromRow)]
struct MemberRow {
    id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: MemberId::from(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
        }
    }
}

/// Holds one pooled connection for the duration of a resolution.
/// Dropping it hands the connection back to the pool.
pub struct PgAccessLookupSession {
    connection: Option<PoolConnection<Postgres>>,
    poisoned: bool,
}

impl PgAccessLookupSession {
    fn new(connection: PoolConnection<Postgres>) -> Self {
        Self {
            connection: Some(connection),
            poisoned: false,
        }
    }

    fn connection(&mut self) -> anyhow::Result<&mut PgConnection> {
        self.connection
            .as_deref_mut()
            .context("Database session was already released")
    }

    fn track<T>(&mut self, result: Result<T, sqlx::Error>) -> Result<T, sqlx::Error> {
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }
}

#[async_trait]
impl AccessLookupSession for PgAccessLookupSession {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_location_id(
        &mut self,
        code: LocationCode,
    ) -> anyhow::Result<Option<LocationId>> {
        let connection = self.connection()?;
        let result = sqlx::query_scalar::<_, i64>(FIND_LOCATION_ID)
            .bind(code.inner())
            .fetch_optional(connection)
            .await;

        let location_id = self
            .track(result)
            .context("Failed to fetch location from Parcs_Locations")?;
        Ok(location_id.map(LocationId::from))
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_subscription_ids(
        &mut self,
        location_id: LocationId,
    ) -> anyhow::Result<Vec<SubscriptionId>> {
        let connection = self.connection()?;
        let result = sqlx::query_scalar::<_, i64>(FIND_SUBSCRIPTION_IDS)
            .bind(location_id.inner())
            .fetch_all(connection)
            .await;

        let ids = self
            .track(result)
            .context("Failed to fetch subscriptions for location")?;
        Ok(ids.into_iter().map(SubscriptionId::from).collect())
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_members(
        &mut self,
        subscription_ids: &[SubscriptionId],
    ) -> anyhow::Result<Vec<Member>> {
        let ids = subscription_ids.iter().map(|id| id.inner()).collect_vec();
        let connection = self.connection()?;
        let result = sqlx::query_as::<_, MemberRow>(FIND_MEMBERS)
            .bind(ids)
            .fetch_all(connection)
            .await;

        let rows = self
            .track(result)
            .context("Failed to fetch members for subscriptions")?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_access_ids(
        &mut self,
        member_ids: &[MemberId],
    ) -> anyhow::Result<Vec<Option<String>>> {
        let ids = member_ids.iter().map(|id| id.inner()).collect_vec();
        let connection = self.connection()?;
        let result = sqlx::query_scalar::<_, Option<String>>(FIND_ACCESS_IDS)
            .bind(ids)
            .fetch_all(connection)
            .await;

        self.track(result)
            .context("Failed to fetch access ids for members")
    }

    async fn release(&mut self) -> anyhow::Result<()> {
        let Some(connection) = self.connection.take() else {
            return Ok(());
        };
        if self.poisoned {
            return connection
                .detach()
                .close()
                .await
                .context("Failed to close database connection after a failed query");
        }
        drop(connection);
        Ok(())
    }
}

#[async_trait]
impl AccessLookupRepo for Repository {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn open_session(&self) -> anyhow::Result<Box<dyn AccessLookupSession>> {
        let connection = self
            .pool()
            .acquire()
            .await
            .context("Failed to acquire a database connection")?;
        Ok(Box::new(PgAccessLookupSession::new(connection)))
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::Repository;
    use entities::locations::{LocationCode, LocationId};
    use entities::members::MemberId;
    use use_cases::access_ids::AccessLookupRepo;

    #[tokio::test]
    #[ignore = "requires a running Postgres instance"]
    async fn test_all_stages_run_on_one_session() {
        let repository = Repository::new_test_repo().await;
        let location_id = repository.insert_location(Some("42")).await;
        let subscription_id = repository.insert_subscription(location_id).await;
        let first = repository.insert_member(subscription_id, "a@example.com").await;
        let second = repository.insert_member(subscription_id, "b@example.com").await;
        repository.insert_token(first, Some("B2")).await;
        repository.insert_token(second, Some("a1")).await;
        repository.insert_token(second, Some("a1")).await;
        repository.insert_token(second, Some(" null ")).await;
        repository.insert_token(second, None).await;

        let mut session = repository.open_session().await.unwrap();
        let found = session
            .find_location_id(LocationCode::try_from("42").unwrap())
            .await
            .unwrap();
        assert_eq!(found, Some(LocationId::from(location_id)));

        let subscriptions = session
            .find_subscription_ids(LocationId::from(location_id))
            .await
            .unwrap();
        assert_eq!(subscriptions.len(), 1);

        let members = session.find_members(&subscriptions).await.unwrap();
        let member_ids: Vec<MemberId> = members.iter().map(|member| member.id).collect();
        assert_eq!(member_ids, vec![MemberId::from(first), MemberId::from(second)]);

        let mut access_ids = session.find_access_ids(&member_ids).await.unwrap();
        access_ids.sort();
        assert_eq!(
            access_ids,
            vec![Some("B2".to_string()), Some("a1".to_string())]
        );

        session.release().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a running Postgres instance"]
    async fn test_dirty_location_codes_are_skipped() {
        let repository = Repository::new_test_repo().await;
        repository.insert_location(None).await;
        repository.insert_location(Some("undefined")).await;
        repository.insert_location(Some("NULL")).await;
        repository.insert_location(Some("")).await;
        repository.insert_location(Some("north-gate")).await;
        let expected = repository.insert_location(Some(" 042 ")).await;
        repository.insert_location(Some("42")).await;

        let mut session = repository.open_session().await.unwrap();
        let found = session
            .find_location_id(LocationCode::try_from("42").unwrap())
            .await
            .unwrap();
        session.release().await.unwrap();

        assert_eq!(found, Some(LocationId::from(expected)));
    }

    #[tokio::test]
    #[ignore = "requires a running Postgres instance"]
    async fn test_unknown_location_yields_no_row() {
        let repository = Repository::new_test_repo().await;
        repository.insert_location(Some("7")).await;

        let mut session = repository.open_session().await.unwrap();
        let found = session
            .find_location_id(LocationCode::try_from("8").unwrap())
            .await
            .unwrap();
        session.release().await.unwrap();

        assert_eq!(found, None);
    }

    #[tokio::test]
    #[ignore = "requires a running Postgres instance"]
    async fn test_released_session_refuses_further_queries() {
        let repository = Repository::new_test_repo().await;

        let mut session = repository.open_session().await.unwrap();
        session.release().await.unwrap();
        session.release().await.unwrap();

        assert!(session
            .find_subscription_ids(LocationId::from(1))
            .await
            .is_err());
    }

    #[tokio::test]
    #[ignore = "requires a running Postgres instance"]
    async fn test_session_with_a_failed_query_is_closed_on_release() {
        let repository = Repository::new_test_repo().await;
        sqlx::query("DROP TABLE tokens")
            .execute(repository.pool())
            .await
            .unwrap();

        let mut session = repository.open_session().await.unwrap();
        assert!(session
            .find_access_ids(&[MemberId::from(1)])
            .await
            .is_err());
        let open_before_release = repository.pool().size();

        session.release().await.unwrap();

        assert_eq!(repository.pool().size(), open_before_release - 1);
    }

    #[tokio::test]
    #[ignore = "requires a running Postgres instance"]
    async fn test_clean_session_returns_its_connection_to_the_pool() {
        let repository = Repository::new_test_repo().await;

        let mut session = repository.open_session().await.unwrap();
        session
            .find_location_id(LocationCode::try_from("1").unwrap())
            .await
            .unwrap();
        let open_before_release = repository.pool().size();

        session.release().await.unwrap();

        assert_eq!(repository.pool().size(), open_before_release);
    }
}
