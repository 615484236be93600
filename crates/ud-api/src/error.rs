//! API error handling
//!
//! Every failure leaves as JSON shaped like [`ErrorBody`], which is what the
//! remote store parses on the other side.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;
use ud_core::error::{ErrorBody, UdError};

/// API error types
#[derive(Debug)]
pub enum ApiError {
    Service(UdError),
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Service(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<UdError> for ApiError {
    fn from(err: UdError) -> Self {
        ApiError::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Service(err) => {
                if status.is_server_error() {
                    warn!(error = %err, "Request failed");
                }
                ErrorBody::from(err)
            }
            ApiError::BadRequest(msg) => ErrorBody {
                error: "bad_request".into(),
                message: msg.clone(),
                fields: vec![],
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
