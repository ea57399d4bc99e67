use crate::errors::{ApiError, ErrorDetailPolicy};
use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::web;
use serde::Serialize;
use use_cases::database_health::ConnectionDetails;

#[derive(Serialize)]
struct TestRow {
    test: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionTestResponse {
    success: bool,
    message: &'static str,
    config: ConnectionDetails,
    test_query: Vec<TestRow>,
}

#[tracing::instrument(err, skip(app, policy), level = "info")]
async fn test_connection(
    app: web::Data<UseCaseAppContainer>,
    policy: web::Data<ErrorDetailPolicy>,
) -> Result<web::Json<ConnectionTestResponse>, ApiError> {
    let report = app
        .get_client()
        .connection_probe()
        .test_connection()
        .await
        .map_err(|err| ApiError::from_connection_test_error(err, &policy))?;

    Ok(web::Json(ConnectionTestResponse {
        success: true,
        message: "Database connection successful",
        config: report.details,
        test_query: report
            .test_query
            .into_iter()
            .map(|test| TestRow { test })
            .collect(),
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/test-connection").route(web::get().to(test_connection)));
}

#[cfg(test)]
mod tests {
    use super::init_routes;
    use crate::routes::test_support::{app_data, FakeApp};
    use actix_web::{test, App};
    use anyhow::anyhow;
    use serde_json::{json, Value};
    use shared_kernel::configuration::Environment;
    use use_cases::database_health::{ConnectionDetails, ConnectionReport, ConnectionTestError};

    fn details() -> ConnectionDetails {
        ConnectionDetails {
            server: "db.internal".to_string(),
            database: "subscription".to_string(),
            user: "subscription_reader".to_string(),
        }
    }

    async fn call(fake: FakeApp, environment: Environment) -> (u16, Value) {
        let (app_container, policy) = app_data(fake, environment);
        let app = test::init_service(
            App::new()
                .app_data(app_container)
                .app_data(policy)
                .configure(init_routes),
        )
        .await;
        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/test-connection").to_request(),
        )
        .await;
        let status = response.status().as_u16();
        (status, test::read_body_json(response).await)
    }

    #[actix_web::test]
    async fn test_successful_probe_echoes_config_and_query() {
        let mut fake = FakeApp::default();
        fake.probe.expect_test_connection().returning(|| {
            Ok(ConnectionReport {
                details: details(),
                test_query: vec![1],
            })
        });

        let (status, body) = call(fake, Environment::Test).await;

        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({
                "success": true,
                "message": "Database connection successful",
                "config": {
                    "server": "db.internal",
                    "database": "subscription",
                    "user": "subscription_reader"
                },
                "testQuery": [{ "test": 1 }]
            })
        );
    }

    #[actix_web::test]
    async fn test_failed_probe_keeps_config_and_hides_details_in_production() {
        let mut fake = FakeApp::default();
        fake.probe.expect_test_connection().returning(|| {
            Err(ConnectionTestError {
                details: details(),
                source: anyhow!("password authentication failed for user"),
            })
        });

        let (status, body) = call(fake, Environment::Production).await;

        assert_eq!(status, 500);
        assert_eq!(body["error"], "Database connection test failed");
        assert_eq!(body["config"]["server"], "db.internal");
        assert!(body.get("details").is_none());
    }
}
