use axum::http::StatusCode;

/// The HTTP status codes this service emits.
///
/// Discriminants are the numeric codes, so `status as u16` is the wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum HttpStatus {
    /// Request succeeded.
    Ok = 200,
    /// Resource created.
    Created = 201,
    /// Accepted but not yet processed.
    Accepted = 202,
    /// Succeeded with no body.
    NoContent = 204,
    /// Invalid parameters or payload.
    BadRequest = 400,
    /// Missing or invalid credentials.
    Unauthorized = 401,
    /// Authenticated but not allowed.
    Forbidden = 403,
    /// Resource does not exist.
    NotFound = 404,
    /// Method not supported on this route.
    MethodNotAllowed = 405,
    /// Unexpected server failure.
    InternalServerError = 500,
    /// Not implemented.
    NotImplemented = 501,
    /// Upstream returned an invalid response.
    BadGateway = 502,
    /// Temporarily unavailable.
    ServiceUnavailable = 503,
    /// Upstream timed out.
    GatewayTimeout = 504,
}

impl HttpStatus {
    /// Every registered status, in ascending order.
    pub const ALL: [HttpStatus; 14] = [
        HttpStatus::Ok,
        HttpStatus::Created,
        HttpStatus::Accepted,
        HttpStatus::NoContent,
        HttpStatus::BadRequest,
        HttpStatus::Unauthorized,
        HttpStatus::Forbidden,
        HttpStatus::NotFound,
        HttpStatus::MethodNotAllowed,
        HttpStatus::InternalServerError,
        HttpStatus::NotImplemented,
        HttpStatus::BadGateway,
        HttpStatus::ServiceUnavailable,
        HttpStatus::GatewayTimeout,
    ];

    /// Numeric value sent on the wire.
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Look up a registered status by its numeric value.
    pub fn from_u16(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_u16() == code)
    }

    /// Returns `true` for 4xx and 5xx codes.
    pub const fn is_error(self) -> bool {
        self.as_u16() >= 400
    }
}

impl From<HttpStatus> for StatusCode {
    fn from(status: HttpStatus) -> Self {
        match status {
            HttpStatus::Ok => StatusCode::OK,
            HttpStatus::Created => StatusCode::CREATED,
            HttpStatus::Accepted => StatusCode::ACCEPTED,
            HttpStatus::NoContent => StatusCode::NO_CONTENT,
            HttpStatus::BadRequest => StatusCode::BAD_REQUEST,
            HttpStatus::Unauthorized => StatusCode::UNAUTHORIZED,
            HttpStatus::Forbidden => StatusCode::FORBIDDEN,
            HttpStatus::NotFound => StatusCode::NOT_FOUND,
            HttpStatus::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HttpStatus::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            HttpStatus::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            HttpStatus::BadGateway => StatusCode::BAD_GATEWAY,
            HttpStatus::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            HttpStatus::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}
