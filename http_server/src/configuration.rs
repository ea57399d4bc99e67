use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx_postgres::configuration::DbSettings;

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    pub database: DbSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub cors_origin: String,
    pub export_traces: bool,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cors_origin: "*".to_string(),
            export_traces: false,
        }
    }
}

impl ApplicationSettings {
    pub fn address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origin.trim() == "*"
    }
}
