//! API error types and responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use provenance_core::{LedgerError, UnauthorizedReason};

/// API error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Missing principal: the x-principal header is required")]
    MissingPrincipal,

    #[error("Admin principal required")]
    AdminRequired,

    #[error("Active role required")]
    ActiveRoleRequired,

    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// HTTP status returned for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingPrincipal | ApiError::ActiveRoleRequired => StatusCode::UNAUTHORIZED,
            ApiError::AdminRequired => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::MissingPrincipal => "MISSING_PRINCIPAL",
            ApiError::AdminRequired => "ADMIN_REQUIRED",
            ApiError::ActiveRoleRequired => "ACTIVE_ROLE_REQUIRED",
            ApiError::NotFound(_) => "NOT_FOUND",
        }
    }
}

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Unauthorized(UnauthorizedReason::AdminRequired) => ApiError::AdminRequired,
            LedgerError::Unauthorized(UnauthorizedReason::ActiveRoleRequired) => {
                ApiError::ActiveRoleRequired
            }
            LedgerError::NotFound(missing) => ApiError::NotFound(missing.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provenance_core::{Missing, Principal};

    #[test]
    fn test_ledger_error_mapping() {
        assert_eq!(ApiError::from(LedgerError::admin_required()), ApiError::AdminRequired);
        assert_eq!(
            ApiError::from(LedgerError::active_role_required()),
            ApiError::ActiveRoleRequired
        );
        assert_eq!(
            ApiError::from(LedgerError::NotFound(Missing::Item(7))),
            ApiError::NotFound("item 7".into())
        );
        assert_eq!(
            ApiError::from(LedgerError::NotFound(Missing::Role(Principal::from("ST1")))),
            ApiError::NotFound("role record for ST1".into())
        );
    }

    #[test]
    fn test_status_codes_follow_ledger_reasons() {
        assert_eq!(
            ApiError::AdminRequired.status().as_u16(),
            UnauthorizedReason::AdminRequired.status_code()
        );
        assert_eq!(
            ApiError::ActiveRoleRequired.status().as_u16(),
            UnauthorizedReason::ActiveRoleRequired.status_code()
        );
        assert_eq!(ApiError::MissingPrincipal.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NotFound("item 3".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::AdminRequired.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
