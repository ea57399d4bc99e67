use crate::configuration::DbSettings;
use sqlx::postgres::PgPool;
use std::sync::Arc;
use use_cases::database_health::ConnectionDetails;

#[derive(Clone)]
pub struct Repository {
    pg_pool: Arc<PgPool>,
    connection_details: ConnectionDetails,
}

impl Repository {
    pub fn pool(&self) -> &PgPool {
        self.pg_pool.as_ref()
    }

    pub(crate) fn details(&self) -> &ConnectionDetails {
        &self.connection_details
    }

    /// Connections are opened on first use, so the process can start while the database is down.
    pub fn new(settings: &DbSettings) -> Self {
        let pg_pool = settings.pool_options().connect_lazy_with(settings.with_db());

        Self {
            pg_pool: Arc::new(pg_pool),
            connection_details: settings.connection_details(),
        }
    }

    #[cfg(any(test, feature = "testing"))]
    pub async fn new_test_repo() -> Self {
        use serde::Deserialize;
        use shared_kernel::configuration::{config_from_directory, Environment};
        use sqlx::Executor;
        use sqlx::{Connection, PgConnection};
        use std::path::PathBuf;
        use uuid::Uuid;

        #[derive(Deserialize)]
        struct TestSettings {
            database: DbSettings,
        }

        let directory = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../configuration");
        let settings: TestSettings = config_from_directory(&directory, Environment::Test)
            .expect("Failed to read test configuration");
        let connection_options = settings.database.without_db();

        let mut connection = PgConnection::connect_with(&connection_options)
            .await
            .expect("Failed to connect to Postgres");

        let db_name = Uuid::new_v4();
        connection
            .execute(&*format!(r#"CREATE DATABASE "{}";"#, db_name))
            .await
            .expect("Failed to create database.");
        println!("The db name is {db_name}");

        let connection_pool = settings
            .database
            .pool_options()
            .connect_with(connection_options.database(&db_name.to_string()))
            .await
            .expect("Failed to connect to Postgres.");
        sqlx::migrate!()
            .run(&connection_pool)
            .await
            .expect("Failed to migrate the database");

        let mut connection_details = settings.database.connection_details();
        connection_details.database = db_name.to_string();

        Self {
            pg_pool: Arc::new(connection_pool),
            connection_details,
        }
    }
}
