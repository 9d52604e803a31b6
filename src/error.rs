use std::panic::Location;

use thiserror::Error;

use crate::enums::error_code::ErrorCode;
use crate::enums::http_status::HttpStatus;

/// The variant of an [`AppError`]. Fixes the HTTP status and the default
/// error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppErrorKind {
    /// Generic HTTP failure; the caller supplies the status.
    Http(HttpStatus),
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    InternalServerError,
}

impl AppErrorKind {
    /// HTTP status a failure of this kind is answered with.
    pub fn status(self) -> HttpStatus {
        match self {
            AppErrorKind::Http(status) => status,
            AppErrorKind::BadRequest => HttpStatus::BadRequest,
            AppErrorKind::Unauthorized => HttpStatus::Unauthorized,
            AppErrorKind::Forbidden => HttpStatus::Forbidden,
            AppErrorKind::NotFound => HttpStatus::NotFound,
            AppErrorKind::InternalServerError => HttpStatus::InternalServerError,
        }
    }

    /// Error code attached when the caller does not provide one.
    pub fn default_error_code(self) -> Option<ErrorCode> {
        match self {
            AppErrorKind::Http(_) => None,
            AppErrorKind::BadRequest => Some(ErrorCode::ValidationError),
            AppErrorKind::Unauthorized | AppErrorKind::Forbidden => {
                Some(ErrorCode::AccessUnauthorized)
            }
            AppErrorKind::NotFound => Some(ErrorCode::ResourcesNotFound),
            AppErrorKind::InternalServerError => Some(ErrorCode::InternalServerError),
        }
    }
}

/// A request-time failure with a client-facing message, an HTTP status and an
/// optional machine-readable code.
///
/// Constructors are `#[track_caller]`: the source location that raised the
/// error is kept for the logs and never sent to clients.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    kind: AppErrorKind,
    message: String,
    error_code: Option<ErrorCode>,
    location: &'static Location<'static>,
}

impl AppError {
    /// Status 500 with no error code.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(AppErrorKind::Http(HttpStatus::InternalServerError), message)
    }

    /// Generic HTTP failure with an explicit status and optional code.
    #[track_caller]
    pub fn http(
        message: impl Into<String>,
        status: HttpStatus,
        error_code: Option<ErrorCode>,
    ) -> Self {
        let mut error = Self::from_kind(AppErrorKind::Http(status), message);
        error.error_code = error_code;
        error
    }

    /// 400, defaults to `VALIDATION_ERROR`.
    #[track_caller]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::from_kind(AppErrorKind::BadRequest, message)
    }

    /// 401, defaults to `ACCESS_UNAUTHORIZED`.
    #[track_caller]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::from_kind(AppErrorKind::Unauthorized, message)
    }

    /// 403, defaults to `ACCESS_UNAUTHORIZED`.
    #[track_caller]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::from_kind(AppErrorKind::Forbidden, message)
    }

    /// 404, defaults to `RESOURCES_NOT_FOUND`.
    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::from_kind(AppErrorKind::NotFound, message)
    }

    /// 500, defaults to `INTERNAL_SERVER_ERROR`.
    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::from_kind(AppErrorKind::InternalServerError, message)
    }

    /// Replace the error code. An explicit code always wins over the
    /// variant's default.
    pub fn with_error_code(mut self, error_code: ErrorCode) -> Self {
        self.error_code = Some(error_code);
        self
    }

    #[track_caller]
    fn from_kind(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            error_code: kind.default_error_code(),
            location: Location::caller(),
        }
    }

    pub fn kind(&self) -> AppErrorKind {
        self.kind
    }

    pub fn status(&self) -> HttpStatus {
        self.kind.status()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error_code
    }

    /// Where the error was constructed.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

/// Any failure that can reach the HTTP boundary.
///
/// Handlers and repositories return this; the error boundary hands it to the
/// translator, which picks the response shape per variant.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be parsed.
    #[error("malformed request body: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    App(#[from] AppError),

    /// Anything that was not classified as an [`AppError`]: driver errors,
    /// I/O, panics caught at the boundary.
    #[error(transparent)]
    Unclassified(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> HttpStatus {
        match self {
            ApiError::MalformedInput(_) => HttpStatus::BadRequest,
            ApiError::App(err) => err.status(),
            ApiError::Unclassified(_) => HttpStatus::InternalServerError,
        }
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        ApiError::Unclassified(err.into())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
