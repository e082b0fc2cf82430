//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
    #[error("config load: {0}")]
    Load(String),
}

/// Business rules that gate interview scheduling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("user must be at least {minimum} years old (age {age})")]
    Underage { age: i32, minimum: i32 },
    #[error("resume position and vacancy position '{vacancy_position}' must match")]
    PositionMismatch { vacancy_position: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("invalid filter '{key}': {reason}")]
    InvalidFilter { key: String, reason: String },
    #[error("invalid date format for {field}: expected {expected}")]
    InvalidDateFormat {
        field: &'static str,
        expected: &'static str,
    },
    #[error("{kind} with id {id} does not exist")]
    Referential { kind: &'static str, id: Uuid },
    #[error(transparent)]
    Rule(#[from] RuleViolation),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn not_found(kind: &str, id: Uuid) -> Self {
        AppError::NotFound(format!("{} {}", kind, id))
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Status, code and caller-facing message. Storage failures never leak raw driver text.
fn classify(err: &AppError) -> (StatusCode, &'static str, String) {
    match err {
        AppError::Config(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "config_error",
            "server misconfigured".into(),
        ),
        AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", err.to_string()),
        AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error", err.to_string()),
        AppError::InvalidFilter { .. } => (StatusCode::BAD_REQUEST, "invalid_filter", err.to_string()),
        AppError::InvalidDateFormat { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_date_format", err.to_string())
        }
        AppError::Referential { .. } => (StatusCode::BAD_REQUEST, "referential_error", err.to_string()),
        AppError::Rule(RuleViolation::Underage { .. }) => {
            (StatusCode::BAD_REQUEST, "underage", err.to_string())
        }
        AppError::Rule(RuleViolation::PositionMismatch { .. }) => {
            (StatusCode::BAD_REQUEST, "position_mismatch", err.to_string())
        }
        AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict", err.to_string()),
        AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", err.to_string()),
        AppError::Db(e) => match e {
            sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "not_found", "record not found".into()),
            sqlx::Error::Database(db) if db.is_unique_violation() => (
                StatusCode::CONFLICT,
                "conflict",
                format!(
                    "duplicate value violates {}",
                    db.constraint().unwrap_or("a unique constraint")
                ),
            ),
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => (
                StatusCode::BAD_REQUEST,
                "referential_error",
                format!(
                    "referenced record does not exist ({})",
                    db.constraint().unwrap_or("foreign key")
                ),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "internal storage error".into(),
            ),
        },
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = classify(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_violations_are_bad_requests_with_specific_codes() {
        let (status, code, _) = classify(&AppError::Rule(RuleViolation::Underage { age: 17, minimum: 18 }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "underage");

        let (status, code, message) = classify(&AppError::Rule(RuleViolation::PositionMismatch {
            vacancy_position: "Backend Engineer".into(),
        }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "position_mismatch");
        assert!(message.contains("Backend Engineer"));
    }

    #[test]
    fn invalid_filter_names_the_key() {
        let err = AppError::InvalidFilter {
            key: "min_exp".into(),
            reason: "expected an integer".into(),
        };
        let (status, code, message) = classify(&err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "invalid_filter");
        assert!(message.contains("min_exp"));
    }

    #[test]
    fn storage_errors_hide_driver_text() {
        let err = AppError::Db(sqlx::Error::Protocol("connection reset by peer at 10.0.0.3".into()));
        let (status, code, message) = classify(&err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "database_error");
        assert!(!message.contains("10.0.0.3"));
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let (status, _, _) = classify(&AppError::Db(sqlx::Error::RowNotFound));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn referential_error_is_bad_request() {
        let err = AppError::Referential {
            kind: "company",
            id: Uuid::nil(),
        };
        let (status, code, _) = classify(&err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "referential_error");
    }
}
