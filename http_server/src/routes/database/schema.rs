use crate::errors::{ApiError, ErrorDetailPolicy};
use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::web;
use entities::schema::TableSchemas;
use serde::Serialize;

#[derive(Serialize)]
struct SchemaResponse {
    schema: TableSchemas,
}

#[tracing::instrument(err, skip(app, policy), level = "info")]
async fn describe_schema(
    app: web::Data<UseCaseAppContainer>,
    policy: web::Data<ErrorDetailPolicy>,
) -> Result<web::Json<SchemaResponse>, ApiError> {
    let schema = app
        .get_client()
        .schema()
        .describe()
        .await
        .map_err(|err| ApiError::schema_unavailable(err, &policy))?;

    Ok(web::Json(SchemaResponse { schema }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/schema").route(web::get().to(describe_schema)));
}

#[cfg(test)]
mod tests {
    use super::init_routes;
    use crate::routes::test_support::{app_data, FakeApp};
    use actix_web::{test, App};
    use anyhow::anyhow;
    use entities::schema::{ColumnDetails, TableSchemas};
    use serde_json::{json, Value};
    use shared_kernel::configuration::Environment;

    async fn call(fake: FakeApp, environment: Environment) -> (u16, Value) {
        let (app_container, policy) = app_data(fake, environment);
        let app = test::init_service(
            App::new()
                .app_data(app_container)
                .app_data(policy)
                .configure(init_routes),
        )
        .await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/schema").to_request()).await;
        let status = response.status().as_u16();
        (status, test::read_body_json(response).await)
    }

    #[actix_web::test]
    async fn test_schema_uses_catalog_column_names() {
        let mut fake = FakeApp::default();
        fake.schema.expect_describe().returning(|| {
            let mut schemas = TableSchemas::new();
            schemas.insert(
                "tokens".to_string(),
                vec![ColumnDetails {
                    column_name: "access_id".to_string(),
                    data_type: "text".to_string(),
                    is_nullable: "YES".to_string(),
                }],
            );
            Ok(schemas)
        });

        let (status, body) = call(fake, Environment::Test).await;

        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({
                "schema": {
                    "tokens": [
                        { "COLUMN_NAME": "access_id", "DATA_TYPE": "text", "IS_NULLABLE": "YES" }
                    ]
                }
            })
        );
    }

    #[actix_web::test]
    async fn test_schema_failure_reports_connection_failure() {
        let mut fake = FakeApp::default();
        fake.schema
            .expect_describe()
            .returning(|| Err(anyhow!("could not connect to server")));

        let (status, body) = call(fake, Environment::Local).await;

        assert_eq!(status, 500);
        assert_eq!(body["error"], "Database connection failed");
        assert_eq!(body["details"], "could not connect to server");
    }
}
