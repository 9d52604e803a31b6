use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::enums::error_code::ErrorCode;
use crate::enums::http_status::HttpStatus;
use crate::error::{ApiError, AppError};

pub const MALFORMED_INPUT_MESSAGE: &str = "Invalid JSON format. Please check your request body";
pub const UNCLASSIFIED_MESSAGE: &str = "Internal server Error";
pub const UNKNOWN_ERROR_DETAIL: &str = "Unknown error occurred";

/// JSON body of every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    MalformedInput {
        message: String,
    },
    App {
        message: String,
        #[serde(rename = "errorCode", skip_serializing_if = "Option::is_none")]
        error_code: Option<ErrorCode>,
    },
    /// Internal failure; `error` carries the underlying message for diagnostics.
    Unclassified {
        message: String,
        error: String,
    },
}

impl ErrorBody {
    /// Status and body for a failure, without logging.
    pub fn render(failure: &ApiError) -> (HttpStatus, ErrorBody) {
        match failure {
            ApiError::MalformedInput(_) => (
                HttpStatus::BadRequest,
                ErrorBody::MalformedInput {
                    message: MALFORMED_INPUT_MESSAGE.to_string(),
                },
            ),
            ApiError::App(err) => (
                err.status(),
                ErrorBody::App {
                    message: err.message().to_string(),
                    error_code: err.error_code(),
                },
            ),
            ApiError::Unclassified(err) => {
                let detail = err.to_string();
                (
                    HttpStatus::InternalServerError,
                    ErrorBody::Unclassified {
                        message: UNCLASSIFIED_MESSAGE.to_string(),
                        error: if detail.is_empty() {
                            UNKNOWN_ERROR_DETAIL.to_string()
                        } else {
                            detail
                        },
                    },
                )
            }
        }
    }
}

/// Convert a failure into the response sent to the client.
///
/// Logs the failure together with the request path, then renders it. Always
/// produces exactly one response.
pub fn translate(failure: &ApiError, path: &str) -> Response {
    match failure {
        ApiError::App(err) => tracing::error!(
            path,
            status = err.status().as_u16(),
            error_code = err.error_code().map(ErrorCode::as_str),
            raised_at = %err.location(),
            "Error occurred on path {path}: {err}"
        ),
        ApiError::MalformedInput(detail) => {
            tracing::error!(path, %detail, "Error occurred on path {path}: malformed request body")
        }
        ApiError::Unclassified(err) => {
            tracing::error!(path, error = ?err, "Error occurred on path {path}: {err:#}")
        }
    }

    let (status, body) = ErrorBody::render(failure);
    (StatusCode::from(status), axum::Json(body)).into_response()
}

/// Marker stored in response extensions by [`ApiError::into_response`] so the
/// error boundary can find and translate the original failure.
#[derive(Debug, Clone)]
pub(crate) struct CarriedFailure(pub(crate) Arc<ApiError>);

/// Produces an empty response with the failure's status and the failure itself
/// in the extensions. The body is written by the error boundary.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = StatusCode::from(self.status()).into_response();
        response
            .extensions_mut()
            .insert(CarriedFailure(Arc::new(self)));
        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_default_code() {
        let failure = ApiError::from(AppError::bad_request("Bad Request"));
        let response = translate(&failure, "/api/test");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Bad Request", "errorCode": "VALIDATION_ERROR" })
        );
    }

    #[tokio::test]
    async fn test_bad_request_explicit_code() {
        let failure = ApiError::from(
            AppError::bad_request("Bad Request").with_error_code(ErrorCode::AuthTokenInvalid),
        );
        let response = translate(&failure, "/");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Bad Request", "errorCode": "AUTH_TOKEN_INVALID" })
        );
    }

    #[tokio::test]
    async fn test_generic_error_without_code_omits_field() {
        let failure = ApiError::from(AppError::new("plain"));
        let response = translate(&failure, "/");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "message": "plain" }));
    }

    #[tokio::test]
    async fn test_malformed_input_is_always_400() {
        let failure = ApiError::MalformedInput("expected value at line 1 column 2".into());
        let response = translate(&failure, "/api/users");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "message": MALFORMED_INPUT_MESSAGE })
        );
    }

    #[tokio::test]
    async fn test_unclassified_failure() {
        let failure = ApiError::from(anyhow::anyhow!("disk full"));
        let response = translate(&failure, "/api/upload");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Internal server Error", "error": "disk full" })
        );
    }

    #[tokio::test]
    async fn test_unclassified_failure_without_message() {
        let failure = ApiError::from(anyhow::anyhow!(""));
        let response = translate(&failure, "/");
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Internal server Error", "error": UNKNOWN_ERROR_DETAIL })
        );
    }

    #[test]
    fn test_same_kind_same_shape() {
        let (_, first) = ErrorBody::render(&AppError::unauthorized("one").into());
        let (_, second) = ErrorBody::render(&AppError::unauthorized("two").into());
        let first = serde_json::to_value(first).unwrap();
        let second = serde_json::to_value(second).unwrap();
        let keys = |v: &Value| v.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys(&first), keys(&second));
    }

    #[test]
    fn test_into_response_carries_failure() {
        let response = AppError::not_found("missing").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let carried = response.extensions().get::<CarriedFailure>().unwrap();
        assert_eq!(carried.0.status(), HttpStatus::NotFound);
    }
}
