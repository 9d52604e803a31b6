use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable error identifiers sent to clients as `errorCode`.
///
/// These are independent of the HTTP status: two failures with the same
/// status can carry different codes so the frontend can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Registration with an email that is already taken.
    AuthEmailAlreadyExists,
    /// Token is malformed, expired or forged.
    AuthTokenInvalid,
    /// No user matches the credentials.
    AuthUserNotFound,
    /// Generic authentication lookup failure. Sent as `AUTH_NO_FOUND`.
    #[serde(rename = "AUTH_NO_FOUND")]
    AuthNotFound,
    /// Too many failed attempts.
    AuthTooManyAttempts,
    AuthAccessUnauthorized,
    AccessUnauthorized,
    /// No token was presented.
    AuthTokenNotFound,
    ValidationError,
    ResourcesNotFound,
    InternalServerError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 11] = [
        ErrorCode::AuthEmailAlreadyExists,
        ErrorCode::AuthTokenInvalid,
        ErrorCode::AuthUserNotFound,
        ErrorCode::AuthNotFound,
        ErrorCode::AuthTooManyAttempts,
        ErrorCode::AuthAccessUnauthorized,
        ErrorCode::AccessUnauthorized,
        ErrorCode::AuthTokenNotFound,
        ErrorCode::ValidationError,
        ErrorCode::ResourcesNotFound,
        ErrorCode::InternalServerError,
    ];

    /// The wire identifier, e.g. `VALIDATION_ERROR`.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::AuthEmailAlreadyExists => "AUTH_EMAIL_ALREADY_EXISTS",
            ErrorCode::AuthTokenInvalid => "AUTH_TOKEN_INVALID",
            ErrorCode::AuthUserNotFound => "AUTH_USER_NOT_FOUND",
            ErrorCode::AuthNotFound => "AUTH_NO_FOUND",
            ErrorCode::AuthTooManyAttempts => "AUTH_TOO_MANY_ATTEMPTS",
            ErrorCode::AuthAccessUnauthorized => "AUTH_ACCESS_UNAUTHORIZED",
            ErrorCode::AccessUnauthorized => "ACCESS_UNAUTHORIZED",
            ErrorCode::AuthTokenNotFound => "AUTH_TOKEN_NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::ResourcesNotFound => "RESOURCES_NOT_FOUND",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
