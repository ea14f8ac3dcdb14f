use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::api::response::ErrorBody;
use crate::domain::team::{TeamError, ValidationErrors};

/// API error type with HTTP status code, message and optional details
///
/// Renders as `{"success": false, "message": ..., "details": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    /// Attaches structured details to the error
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 503 Service Unavailable error
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Field-keyed validation failure
    pub fn invalid_body(errors: &ValidationErrors) -> Self {
        Self::bad_request("Invalid request body").with_details(json!(errors))
    }

    /// Translates a team failure at the HTTP boundary
    ///
    /// `failure` is the generic message used for unexpected faults; their
    /// detail is logged and never returned to the caller.
    pub fn from_team_error(err: TeamError, failure: &str) -> Self {
        match err {
            TeamError::Validation(errors) => Self::invalid_body(&errors),
            TeamError::InvalidIdentity(_) => Self::bad_request("Invalid team id"),
            TeamError::NotFound(_) => Self::not_found("Team not found"),
            TeamError::StoreUnavailable(detail) => {
                tracing::warn!(error = %detail, "{}", failure);
                Self::service_unavailable("Service temporarily unavailable")
            }
            TeamError::Unknown(detail) => {
                tracing::error!(error = %detail, "{}", failure);
                Self::internal_server_error(failure)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            message: self.message,
            details: self.details,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("Invalid request body").with_details(json!({
            "body": [rejection.body_text()]
        }))
    }
}

/// Path segments that cannot be decoded never name a team
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected path parameter");
        Self::bad_request("Invalid team id")
    }
}
