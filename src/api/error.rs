//! Translation of service errors into HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::FieldError;
use crate::Error;

/// Error body returned by every failing route
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = 404)]
    pub status: u16,
    #[schema(example = "Not Found")]
    pub error: String,
    #[schema(example = "Contact not found: 42")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
    pub timestamp: DateTime<Utc>,
}

/// Public message for server faults; the detail only goes to the log
const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Vec<FieldError>,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    pub fn validation(details: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("validation failed for {} field(s)", details.len()),
            details,
        }
    }

    /// Mapping for create, update and delete: any caller-side failure,
    /// including an unknown id, is a rejected request.
    pub fn rejected(err: Error) -> Self {
        match err {
            Error::ContactNotFound(_) => Self::bad_request(err.to_string()),
            other => other.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
            details: Vec::new(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::ContactNotFound(_) => Self::not_found(err.to_string()),
            Error::Validation(details) => Self::validation(details),
            other => {
                tracing::error!(error = %other, "Contact service failure");
                Self::internal(INTERNAL_MESSAGE)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: self.status.as_u16(),
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            message: self.message,
            details: self.details,
            timestamp: Utc::now(),
        };
        (self.status, Json(body)).into_response()
    }
}
