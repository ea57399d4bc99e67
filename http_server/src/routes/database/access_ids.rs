use crate::errors::{ApiError, ErrorDetailPolicy};
use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::web;
use entities::access::AccessIds;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Request {
    location_code: Option<String>,
}

#[derive(Serialize)]
struct AccessIdsResponse {
    message: &'static str,
    data: AccessIds,
}

#[tracing::instrument(err, skip(app, policy), level = "info")]
async fn access_ids_for_location(
    data: web::Query<Request>,
    app: web::Data<UseCaseAppContainer>,
    policy: web::Data<ErrorDetailPolicy>,
) -> Result<web::Json<AccessIdsResponse>, ApiError> {
    let access_ids = app
        .get_client()
        .access_ids()
        .resolve(data.into_inner().location_code)
        .await
        .map_err(|err| ApiError::from_resolve_error(err, &policy))?;

    Ok(web::Json(AccessIdsResponse {
        message: "Success! All queries completed",
        data: access_ids,
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Query strings that cannot be read answer with the same envelope as a rejected code.
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into());

    cfg.service(
        web::resource("/accessIds_for_location")
            .app_data(query_config)
            .route(web::get().to(access_ids_for_location)),
    );
}
