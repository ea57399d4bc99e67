use crate::errors::{ErrorDetailPolicy, ScoresApiError};
use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use entities::scores::{Score, ScoreId};
use serde::{Deserialize, Serialize};
use use_cases::scores::{ScoreRequest, ScoresError};

#[derive(Deserialize, Debug)]
struct ScorePayload {
    player: Option<String>,
    score: Option<i32>,
    date: Option<DateTime<Utc>>,
}

impl From<ScorePayload> for ScoreRequest {
    fn from(value: ScorePayload) -> Self {
        ScoreRequest {
            player: value.player,
            score: value.score,
            date: value.date,
        }
    }
}

#[derive(Serialize)]
struct DataResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

impl<T> DataResponse<T> {
    fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    fn with_message(data: T, message: &'static str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message),
        }
    }
}

#[derive(Serialize)]
struct MessageResponse {
    success: bool,
    message: &'static str,
}

fn failure<'a>(
    operation: &'static str,
    policy: &'a ErrorDetailPolicy,
) -> impl FnOnce(ScoresError) -> ScoresApiError + 'a {
    move |err| ScoresApiError::new(err, operation, policy)
}

#[tracing::instrument(err, skip(app, policy), level = "info")]
async fn list_scores(
    app: web::Data<UseCaseAppContainer>,
    policy: web::Data<ErrorDetailPolicy>,
) -> Result<web::Json<DataResponse<Vec<Score>>>, ScoresApiError> {
    let scores = app
        .get_client()
        .scores()
        .list()
        .await
        .map_err(failure("Failed to fetch scores", &policy))?;

    Ok(web::Json(DataResponse::new(scores)))
}

#[tracing::instrument(err, skip(app, policy), level = "info")]
async fn get_score(
    id: web::Path<i64>,
    app: web::Data<UseCaseAppContainer>,
    policy: web::Data<ErrorDetailPolicy>,
) -> Result<web::Json<DataResponse<Score>>, ScoresApiError> {
    let score = app
        .get_client()
        .scores()
        .get(ScoreId::from(id.into_inner()))
        .await
        .map_err(failure("Failed to fetch score", &policy))?;

    Ok(web::Json(DataResponse::new(score)))
}

#[tracing::instrument(err, skip(app, policy), level = "info")]
async fn create_score(
    payload: web::Json<ScorePayload>,
    app: web::Data<UseCaseAppContainer>,
    policy: web::Data<ErrorDetailPolicy>,
) -> Result<HttpResponse, ScoresApiError> {
    let score = app
        .get_client()
        .scores()
        .create(payload.into_inner().into())
        .await
        .map_err(failure("Failed to create score", &policy))?;

    Ok(HttpResponse::Created().json(DataResponse::with_message(
        score,
        "Score created successfully",
    )))
}

#[tracing::instrument(err, skip(app, policy), level = "info")]
async fn update_score(
    id: web::Path<i64>,
    payload: web::Json<ScorePayload>,
    app: web::Data<UseCaseAppContainer>,
    policy: web::Data<ErrorDetailPolicy>,
) -> Result<web::Json<DataResponse<Score>>, ScoresApiError> {
    let score = app
        .get_client()
        .scores()
        .update(ScoreId::from(id.into_inner()), payload.into_inner().into())
        .await
        .map_err(failure("Failed to update score", &policy))?;

    Ok(web::Json(DataResponse::with_message(
        score,
        "Score updated successfully",
    )))
}

#[tracing::instrument(err, skip(app, policy), level = "info")]
async fn delete_score(
    id: web::Path<i64>,
    app: web::Data<UseCaseAppContainer>,
    policy: web::Data<ErrorDetailPolicy>,
) -> Result<web::Json<MessageResponse>, ScoresApiError> {
    app.get_client()
        .scores()
        .delete(ScoreId::from(id.into_inner()))
        .await
        .map_err(failure("Failed to delete score", &policy))?;

    Ok(web::Json(MessageResponse {
        success: true,
        message: "Score deleted successfully",
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Malformed ids and bodies answer with the same envelope as the handlers.
    let path_config = web::PathConfig::default()
        .error_handler(|_, _| ScoresApiError::NotFound(ScoresError::NotFound.to_string()).into());
    let json_config = web::JsonConfig::default()
        .error_handler(|_, _| ScoresApiError::BadRequest(ScoresError::Validation.to_string()).into());

    cfg.service(
        web::scope("/scores")
            .app_data(path_config)
            .app_data(json_config)
            .service(
                web::resource("")
                    .route(web::get().to(list_scores))
                    .route(web::post().to(create_score)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_score))
                    .route(web::put().to(update_score))
                    .route(web::delete().to(delete_score)),
            ),
    );
}
