use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::time::Duration;
use use_cases::database_health::ConnectionDetails;

type DbName = String;

/// Connection settings for the backing store. `password` has no default and must be supplied.
#[derive(Debug, Deserialize, Clone)]
pub struct DbSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    username: String,
    password: Secret<String>,
    database_name: DbName,
    #[serde(default)]
    require_ssl: bool,
    #[serde(default)]
    pool: PoolSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PoolSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    max_connections: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    min_connections: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    idle_timeout_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    connect_timeout_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    statement_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            idle_timeout_secs: 30,
            connect_timeout_secs: 30,
            statement_timeout_secs: 30,
        }
    }
}

impl DbSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        let statement_timeout_ms = self.pool.statement_timeout_secs * 1000;
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .ssl_mode(ssl_mode)
            .options([("statement_timeout", statement_timeout_ms)])
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.pool.max_connections)
            .min_connections(self.pool.min_connections)
            .idle_timeout(Some(Duration::from_secs(self.pool.idle_timeout_secs)))
            .acquire_timeout(Duration::from_secs(self.pool.connect_timeout_secs))
    }

    pub fn connection_details(&self) -> ConnectionDetails {
        ConnectionDetails {
            server: self.host.clone(),
            database: self.database_name.clone(),
            user: self.username.clone(),
        }
    }
}
