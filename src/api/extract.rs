use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::{ApiError, AppError};

/// JSON extractor and response whose rejection is an [`ApiError`], so body
/// decoding failures reach the translator like any other failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Syntax errors and unreadable bodies are malformed input. Well-formed JSON
/// with the wrong shape, or a missing JSON content type, is a validation
/// failure. A body over the size limit is not a parse problem and is left
/// unclassified.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(err) => ApiError::MalformedInput(err.body_text()),
            JsonRejection::JsonDataError(err) => AppError::bad_request(err.body_text()).into(),
            JsonRejection::MissingJsonContentType(err) => {
                AppError::bad_request(err.body_text()).into()
            }
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                ApiError::Unclassified(anyhow::Error::msg(other.body_text()))
            }
            other => ApiError::MalformedInput(other.body_text()),
        }
    }
}
