use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use axum::extract::Request;
use axum::http::header::{ALLOW, CONTENT_TYPE};
use axum::middleware::Next;
use axum::response::Response;
use futures::FutureExt;

use crate::api::errors::{translate, CarriedFailure};
use crate::enums::http_status::HttpStatus;
use crate::error::{ApiError, AppError};

/// Drive a request future and route its failure, if any, to `translator`.
///
/// A successful response is returned untouched and the translator is not
/// called. A carried failure, a bare error status produced by the router
/// itself (such as 405), or a panic at any point of the future's execution is
/// passed to the translator exactly once. Nothing is retried.
pub async fn catch_failures<F, T>(path: &str, handler: F, translator: T) -> Response
where
    F: Future<Output = Response>,
    T: FnOnce(&ApiError, &str) -> Response,
{
    match AssertUnwindSafe(handler).catch_unwind().await {
        Ok(mut response) => match response.extensions_mut().remove::<CarriedFailure>() {
            Some(CarriedFailure(failure)) => translator(&failure, path),
            None => match bare_failure(&response) {
                Some(failure) => {
                    let mut translated = translator(&failure, path);
                    if let Some(allow) = response.headers().get(ALLOW) {
                        translated.headers_mut().insert(ALLOW, allow.clone());
                    }
                    translated
                }
                None => response,
            },
        },
        Err(payload) => {
            let failure = ApiError::Unclassified(anyhow::Error::msg(panic_message(payload.as_ref())));
            translator(&failure, path)
        }
    }
}

/// Axum middleware installing [`catch_failures`] with [`translate`] around
/// every route.
pub async fn error_boundary(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    catch_failures(&path, next.run(request), translate).await
}

/// An error status with no body type, as emitted by axum's method router.
fn bare_failure(response: &Response) -> Option<ApiError> {
    if response.headers().contains_key(CONTENT_TYPE) {
        return None;
    }
    let status = HttpStatus::from_u16(response.status().as_u16()).filter(|s| s.is_error())?;
    let message = response
        .status()
        .canonical_reason()
        .unwrap_or("Request failed");
    Some(AppError::http(message, status, None).into())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::new()
    }
}
