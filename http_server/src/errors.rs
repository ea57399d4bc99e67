use actix_web::{
    error,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use serde_json::{json, Value};
use shared_kernel::configuration::Environment;
use thiserror::Error;
use use_cases::access_ids::ResolveAccessIdsError;
use use_cases::database_health::{ConnectionDetails, ConnectionTestError};
use use_cases::scores::ScoresError;

/// Decides whether driver messages reach the client.
#[derive(Clone, Copy, Debug)]
pub struct ErrorDetailPolicy {
    expose_details: bool,
}

impl ErrorDetailPolicy {
    pub fn new(environment: Environment) -> Self {
        Self {
            expose_details: environment.exposes_error_details(),
        }
    }

    pub fn details(&self, error: &dyn std::fmt::Display) -> Option<String> {
        self.expose_details.then(|| error.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{error}")]
    InternalServerError {
        error: &'static str,
        details: Option<String>,
    },
    #[error("Database connection test failed")]
    ConnectionTestFailed {
        details: Option<String>,
        config: ConnectionDetails,
    },
}

impl ApiError {
    pub fn from_resolve_error(err: ResolveAccessIdsError, policy: &ErrorDetailPolicy) -> Self {
        match err {
            err @ ResolveAccessIdsError::Validation(_) => ApiError::BadRequest(err.to_string()),
            ResolveAccessIdsError::NotFound(stage) => ApiError::NotFound(stage.message()),
            err @ (ResolveAccessIdsError::Query { .. }
            | ResolveAccessIdsError::SessionUnavailable(_)) => ApiError::InternalServerError {
                error: "Database query failed",
                details: policy.details(&err),
            },
        }
    }

    pub fn from_connection_test_error(err: ConnectionTestError, policy: &ErrorDetailPolicy) -> Self {
        ApiError::ConnectionTestFailed {
            details: policy.details(&format_args!("{:#}", err.source)),
            config: err.details,
        }
    }

    pub fn schema_unavailable(err: anyhow::Error, policy: &ErrorDetailPolicy) -> Self {
        ApiError::InternalServerError {
            error: "Database connection failed",
            details: policy.details(&format_args!("{err:#}")),
        }
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError { .. } | ApiError::ConnectionTestFailed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::BadRequest(message) => json!({ "message": message }),
            ApiError::NotFound(message) => json!({ "message": message }),
            ApiError::InternalServerError { error, details } => {
                with_details(json!({ "error": error }), details)
            }
            ApiError::ConnectionTestFailed { details, config } => with_details(
                json!({ "error": self.to_string(), "config": config }),
                details,
            ),
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }
}

/// Errors of the scores routes, which answer with a `success: false` envelope.
#[derive(Error, Debug)]
pub enum ScoresApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{error}")]
    InternalServerError {
        error: &'static str,
        details: Option<String>,
    },
}

impl ScoresApiError {
    /// `failure` names the operation, e.g. "Failed to fetch scores".
    pub fn new(err: ScoresError, failure: &'static str, policy: &ErrorDetailPolicy) -> Self {
        match err {
            ScoresError::Validation => ScoresApiError::BadRequest(err.to_string()),
            ScoresError::NotFound => ScoresApiError::NotFound(err.to_string()),
            ScoresError::Store(source) => ScoresApiError::InternalServerError {
                error: failure,
                details: policy.details(&format_args!("{source:#}")),
            },
        }
    }
}

impl error::ResponseError for ScoresApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            ScoresApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ScoresApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ScoresApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ScoresApiError::InternalServerError { error, details } => with_details(
                json!({ "success": false, "error": error }),
                details,
            ),
            _ => json!({ "success": false, "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }
}

fn with_details(mut body: Value, details: &Option<String>) -> Value {
    if let (Value::Object(map), Some(details)) = (&mut body, details) {
        map.insert("details".to_string(), Value::String(details.clone()));
    }
    body
}
