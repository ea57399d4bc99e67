use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::{web, HttpResponse};
use serde_json::json;

async fn index() -> &'static str {
    "Backend is running!"
}

#[tracing::instrument(skip(app), level = "info")]
async fn healthcheck(app: web::Data<UseCaseAppContainer>) -> HttpResponse {
    if app.get_client().connection_probe().is_healthy().await {
        HttpResponse::Ok().json(json!({ "status": "healthy" }))
    } else {
        HttpResponse::ServiceUnavailable().json(json!({ "status": "unhealthy" }))
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/healthcheck").route(web::get().to(healthcheck)));
}
