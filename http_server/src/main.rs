use crate::configuration::Settings;
use crate::errors::ErrorDetailPolicy;
use crate::use_case_app_container::UseCaseAppContainer;
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use shared_kernel::configuration::{config, Environment};
use shared_kernel::telemetry::{config_telemetry, shutdown_global_tracer_provider};
use sqlx_postgres::repository::Repository;
use tracing_actix_web::TracingLogger;
use use_cases::AppImpl;

mod configuration;
mod errors;
mod routes;
mod use_case_app_container;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env()?;
    let settings: Settings = config(environment)?;
    config_telemetry("http_server", settings.application.export_traces)?;

    let details = settings.database.connection_details();
    tracing::info!(
        environment = environment.as_str(),
        server = %details.server,
        database = %details.database,
        user = %details.user,
        "Loaded configuration"
    );

    let repository = Repository::new(&settings.database);
    let policy = ErrorDetailPolicy::new(environment);
    let cors_origin = settings.application.cors_origin.clone();
    let any_origin = settings.application.allows_any_origin();
    let address = settings.application.address();

    tracing::info!(host = %address.0, port = address.1, "Starting server");
    let result = HttpServer::new(move || {
        let app = AppImpl::new(repository.clone());
        let app_container = UseCaseAppContainer::new(app);
        let cors = if any_origin {
            Cors::permissive()
        } else {
            Cors::default()
                .allowed_origin(&cors_origin)
                .allow_any_method()
                .allow_any_header()
        };
        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .configure(routes::config)
            .app_data(web::Data::new(app_container))
            .app_data(web::Data::new(policy))
    })
    .bind(address)?
    .run()
    .await
    .context("Server failed to run");

    shutdown_global_tracer_provider();
    result
}
