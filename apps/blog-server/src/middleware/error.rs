//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blog_core::DomainError;
use blog_core::error::RepoError;
use blog_core::ports::RenderError;
use blog_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    PayloadTooLarge(String),
    Unauthorized,
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::PayloadTooLarge(detail) => ErrorResponse::payload_too_large(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized()
                .with_detail("Provide a Bearer token or an access_token cookie."),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl AppError {
    /// A request body the extractor could not decode. Keeps its status and cause.
    pub fn from_payload(err: actix_web::Error) -> Self {
        match err.as_response_error().status_code() {
            StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(err.to_string()),
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::MissingField(field) => {
                AppError::BadRequest(format!("Missing form field: {}", field))
            }
            DomainError::Unauthorized => AppError::Unauthorized,
            DomainError::Repository(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_status() {
        let not_found: AppError = DomainError::NotFound {
            entity_type: "Post",
            id: 1,
        }
        .into();
        let missing: AppError = DomainError::MissingField("title").into();
        let unauthorized: AppError = DomainError::Unauthorized.into();
        let query: AppError = DomainError::Repository(RepoError::Query("boom".into())).into();

        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(query.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_payload_errors_keep_their_cause() {
        let overflow = AppError::from_payload(
            actix_web::error::UrlencodedError::Overflow {
                size: 2048,
                limit: 1024,
            }
            .into(),
        );
        let content_type =
            AppError::from_payload(actix_web::error::UrlencodedError::ContentType.into());

        assert_eq!(overflow.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(overflow.to_string().contains("2048"));
        assert_eq!(content_type.status_code(), StatusCode::BAD_REQUEST);
        assert!(!content_type.to_string().contains("Missing form field"));
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let err: AppError = RepoError::Query("relation \"posts\" does not exist".into()).into();

        assert_eq!(err.to_string(), "Internal error: Database error");
    }
}
