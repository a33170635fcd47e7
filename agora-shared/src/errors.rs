use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::types::ApiErrorResponse;

/// Application error codes following the pattern E{service}{sequence}
///
/// Ranges:
/// - E0xxx: Shared/infrastructure errors
/// - E1xxx: Auth errors
/// - E2xxx: Group errors
/// - E3xxx: Feedback errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Shared (E0xxx)
    InternalError,
    ValidationError,
    NotFound,
    Unauthorized,
    Forbidden,
    BadRequest,
    DependencyError,
    IntegrityError,
    NotConfigured,

    // Auth (E1xxx)
    InvalidCredentials,
    EmailNotVerified,
    TokenInvalid,
    TokenExpired,
    ProfileNotFound,
    VerificationNotFound,

    // Groups (E2xxx)
    InvalidInviteCode,
    GroupNotFound,
    GroupFull,
    InvalidDisplayName,
    NotInstructor,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            // Shared
            Self::InternalError => "E0001",
            Self::ValidationError => "E0002",
            Self::NotFound => "E0003",
            Self::Unauthorized => "E0004",
            Self::Forbidden => "E0005",
            Self::BadRequest => "E0006",
            Self::DependencyError => "E0007",
            Self::IntegrityError => "E0008",
            Self::NotConfigured => "E0009",

            // Auth
            Self::InvalidCredentials => "E1001",
            Self::EmailNotVerified => "E1002",
            Self::TokenInvalid => "E1003",
            Self::TokenExpired => "E1004",
            Self::ProfileNotFound => "E1005",
            Self::VerificationNotFound => "E1006",

            // Groups
            Self::InvalidInviteCode => "E2001",
            Self::GroupNotFound => "E2002",
            Self::GroupFull => "E2003",
            Self::InvalidDisplayName => "E2004",
            Self::NotInstructor => "E2005",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InternalError
            | Self::DependencyError
            | Self::IntegrityError
            | Self::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ValidationError
            | Self::BadRequest
            | Self::TokenInvalid
            | Self::TokenExpired
            | Self::InvalidInviteCode
            | Self::InvalidDisplayName => StatusCode::BAD_REQUEST,
            Self::NotFound
            | Self::ProfileNotFound
            | Self::VerificationNotFound
            | Self::GroupNotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized | Self::InvalidCredentials | Self::EmailNotVerified => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden | Self::NotInstructor => StatusCode::FORBIDDEN,
            Self::GroupFull => StatusCode::CONFLICT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Known {
        code: ErrorCode,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(code: ErrorCode, message: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Known {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn dependency(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DependencyError, message)
    }

    /// A required external-service setting is absent. Surfaced with the
    /// setting's name rather than a generic internal fault.
    pub fn not_configured(setting: &str) -> Self {
        Self::new(ErrorCode::NotConfigured, format!("{setting} is not configured"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::Known { code, message, details } => {
                let status = code.status_code();
                let mut resp = ApiErrorResponse::new(code.code(), message);
                if let Some(d) = details {
                    resp = resp.with_details(d.clone());
                }
                (status, resp)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse::new("E0001", "internal server error"),
                )
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                match err {
                    diesel::result::Error::NotFound => (
                        StatusCode::NOT_FOUND,
                        ApiErrorResponse::new("E0003", "resource not found"),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiErrorResponse::new("E0001", "database error"),
                    ),
                }
            }
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse::new("E0002", msg),
            ),
        };

        (status, Json(error_response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_taxonomy() {
        assert_eq!(ErrorCode::ValidationError.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::EmailNotVerified.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::NotInstructor.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::ProfileNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::IntegrityError.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorCode::DependencyError.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorCode::NotConfigured.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorCode::GroupFull.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn wire_codes_are_stable() {
        assert_eq!(ErrorCode::NotConfigured.code(), "E0009");
        assert_eq!(ErrorCode::TokenExpired.code(), "E1004");
        assert_eq!(ErrorCode::InvalidInviteCode.code(), "E2001");
    }

    #[test]
    fn not_configured_names_the_setting() {
        let err = AppError::not_configured("EMAIL_API_KEY");
        assert_eq!(err.to_string(), "EMAIL_API_KEY is not configured");
    }

    #[test]
    fn validation_variant_renders_as_400() {
        let response = AppError::Validation("email: invalid email format".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
