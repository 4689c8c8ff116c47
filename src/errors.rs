use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use sqlx::postgres::PgDatabaseError;
use validator::ValidationErrors;

const NOT_NULL_VIOLATION: &str = "23502";
const CHECK_VIOLATION: &str = "23514";

#[derive(Debug)]
pub enum AppError {
    ConstraintViolation(Vec<FieldError>),
    NotFound(String),
    ConnectivityFailure(String),
    OriginRejected(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ConstraintViolation(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Constraint violation: {}", messages)
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ConnectivityFailure(msg) => write!(f, "Database unavailable: {}", msg),
            AppError::OriginRejected(origin) => write!(f, "Origin not allowed: {}", origin),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ConstraintViolation(errors) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            // Driver messages can carry host names; keep them in the logs only.
            AppError::ConnectivityFailure(_) => {
                serde_json::json!({"error": "Database connection failed"})
            }
            AppError::InternalError(_) => {
                serde_json::json!({"error": "Internal server error"})
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ConstraintViolation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConnectivityFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::OriginRejected(_) => StatusCode::FORBIDDEN,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    /// Shorthand for a single-field constraint violation.
    pub fn constraint(field: &str, message: impl Into<String>) -> Self {
        AppError::ConstraintViolation(vec![FieldError {
            field: field.to_string(),
            message: message.into(),
        }])
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ConstraintViolation(field_errors)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(e) if matches!(e.code().as_deref(), Some(NOT_NULL_VIOLATION) | Some(CHECK_VIOLATION)) => {
                // NOT NULL violations carry the column, CHECK violations the constraint name.
                let field = e
                    .try_downcast_ref::<PgDatabaseError>()
                    .and_then(|pg| pg.column())
                    .or_else(|| e.constraint())
                    .unwrap_or("row")
                    .to_string();
                AppError::ConstraintViolation(vec![FieldError {
                    field,
                    message: e.message().to_string(),
                }])
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => AppError::ConnectivityFailure(err.to_string()),
            _ => AppError::InternalError(format!("Database error: {}", err))
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[derive(Debug, Display)]
pub enum ConnectionStringError {
    #[display("Connection string is empty")]
    Empty,

    #[display("Connection string is not a valid URL: {_0}")]
    Malformed(String),

    #[display("Unsupported scheme '{_0}', expected postgres:// or postgresql://")]
    UnsupportedScheme(String),

    #[display("Connection string has no username")]
    MissingUsername,

    #[display("Connection string has no host")]
    MissingHost,
}

impl std::error::Error for ConnectionStringError {}

#[derive(Debug, Display)]
pub enum OriginPatternError {
    #[display("Origin entry is empty")]
    Empty,

    #[display("Invalid origin entry '{_0}'")]
    Invalid(String),

    #[display("Wildcard must be the leftmost host label in '{_0}'")]
    MisplacedWildcard(String),
}

impl std::error::Error for OriginPatternError {}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        assert_eq!(AppError::constraint("cloudinary_url", "required").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::ConnectivityFailure("x".into()).status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(AppError::OriginRejected("http://evil.test".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::InternalError("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(AppError::from(sqlx::Error::RowNotFound), AppError::NotFound(_)));
    }

    #[test]
    fn pool_timeouts_map_to_connectivity_failure() {
        assert!(matches!(AppError::from(sqlx::Error::PoolTimedOut), AppError::ConnectivityFailure(_)));
        assert!(matches!(AppError::from(sqlx::Error::PoolClosed), AppError::ConnectivityFailure(_)));

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(AppError::from(sqlx::Error::Io(io)), AppError::ConnectivityFailure(_)));
    }

    #[test]
    fn validation_errors_become_field_errors() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("required");
        err.message = Some("cloudinary_url is required".into());
        errors.add("cloudinary_url", err);

        match AppError::from(errors) {
            AppError::ConstraintViolation(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "cloudinary_url");
                assert_eq!(fields[0].message, "cloudinary_url is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[actix_rt::test]
    async fn connectivity_failure_body_hides_driver_message() {
        let response = AppError::ConnectivityFailure("lookup db.internal failed".into()).error_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Database connection failed");
    }
}
