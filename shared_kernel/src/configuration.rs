use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// The environment the process runs in, selected through `APP_ENVIRONMENT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Local,
    Test,
    Production,
}

#[derive(thiserror::Error, Debug)]
#[error("{0} is not a supported environment. Use either `local`, `test` or `production`")]
pub struct UnknownEnvironment(String);

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let value = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        Environment::try_from(value).context("Failed to parse APP_ENVIRONMENT")
    }

    /// Error details (driver messages, failing stage) are only shown outside production.
    pub fn exposes_error_details(&self) -> bool {
        !matches!(self, Environment::Production)
    }
}

impl TryFrom<String> for Environment {
    type Error = UnknownEnvironment;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "test" => Ok(Environment::Test),
            "production" => Ok(Environment::Production),
            _ => Err(UnknownEnvironment(value)),
        }
    }
}

pub fn configuration_directory() -> anyhow::Result<PathBuf> {
    if let Ok(directory) = std::env::var("APP_CONFIGURATION_DIRECTORY") {
        return Ok(PathBuf::from(directory));
    }
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    Ok(base_path.join("configuration"))
}

pub fn config<Settings: DeserializeOwned>(environment: Environment) -> anyhow::Result<Settings> {
    let configuration_directory = configuration_directory()?;
    config_from_directory(&configuration_directory, environment)
}

/// Layers `base.yaml`, then `<environment>.yaml`, then `APP_`-prefixed environment variables.
pub fn config_from_directory<Settings: DeserializeOwned>(
    configuration_directory: &Path,
    environment: Environment,
) -> anyhow::Result<Settings> {
    let environment_file = format!("{}.yaml", environment.as_str());
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::File::from(configuration_directory.join(environment_file)).required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Failed to build configuration")?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}
