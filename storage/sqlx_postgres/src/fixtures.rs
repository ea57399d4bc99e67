use crate::repository::Repository;

impl Repository {
    pub(crate) async fn insert_location(&self, code: Option<&str>) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO parcs_locations (location_code, name) VALUES ($1, 'Gate') RETURNING location_id",
        )
        .bind(code)
        .fetch_one(self.pool())
        .await
        .unwrap()
    }

    pub(crate) async fn insert_subscription(&self, location_platform_id: i64) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO subscriptions (location_platform_id) VALUES ($1) RETURNING id",
        )
        .bind(location_platform_id)
        .fetch_one(self.pool())
        .await
        .unwrap()
    }

    pub(crate) async fn insert_member(&self, subscription_id: i64, email: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO members (subscription_id, first_name, last_name, email)
            VALUES ($1, 'Jane', 'Doe', $2)
            RETURNING id
            "#,
        )
        .bind(subscription_id)
        .bind(email)
        .fetch_one(self.pool())
        .await
        .unwrap()
    }

    pub(crate) async fn insert_token(&self, member_id: i64, access_id: Option<&str>) {
        sqlx::query("INSERT INTO tokens (member_id, access_id) VALUES ($1, $2)")
            .bind(member_id)
            .bind(access_id)
            .execute(self.pool())
            .await
            .unwrap();
    }
}
