//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

/// One failing input field. `field` names the body key, query parameter or path segment.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("spherical horse with id {0} not found")]
    HorseNotFound(Uuid),
    #[error("validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),
    #[error("unknown sort field '{0}'; expected one of: {}", crate::model::SortField::names().join(", "))]
    InvalidSortField(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    /// Body could not be read as JSON at all; keeps the extractor's status (400, 413, 415).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::HorseNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidSortField(_) => StatusCode::BAD_REQUEST,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected { status, .. } => *status,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::HorseNotFound(_) => "not_found",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidSortField(_) => "invalid_sort_field",
            AppError::Db(sqlx::Error::RowNotFound) => "not_found",
            AppError::Db(_) => "database_error",
            AppError::Rejected { .. } => "invalid_request",
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::validation("body", e.body_text()),
            other => AppError::Rejected {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation("query", rejection.body_text())
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Store and startup failures keep their detail in the log only.
        let message = match &self {
            AppError::Db(sqlx::Error::RowNotFound) => "resource not found".to_string(),
            AppError::Db(e) => {
                tracing::error!(error = %e, "database failure");
                "internal server error".to_string()
            }
            AppError::Config(e) => {
                tracing::error!(error = %e, "configuration failure");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        let details = match &self {
            AppError::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message,
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_names_the_identifier() {
        let id = Uuid::nil();
        let (status, body) = body_json(AppError::HorseNotFound(id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
        assert_eq!(
            body["error"]["message"],
            format!("spherical horse with id {} not found", id)
        );
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn validation_lists_every_field() {
        let err = AppError::Validation(vec![
            FieldError::new("name", "must be at least 1 characters"),
            FieldError::new("radius", "must be greater than 0"),
        ]);
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_error");
        let details = body["error"]["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[1]["field"], "radius");
    }

    #[tokio::test]
    async fn database_errors_are_not_leaked() {
        let err = AppError::Db(sqlx::Error::PoolTimedOut);
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "database_error");
        assert_eq!(body["error"]["message"], "internal server error");
    }

    #[test]
    fn rejection_keeps_its_status() {
        let err = AppError::Rejected {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "Expected request with `Content-Type: application/json`".into(),
        };
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.code(), "invalid_request");
    }

    #[test]
    fn unknown_sort_field_is_a_bad_request() {
        let err = AppError::InvalidSortField("weight".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let msg = err.to_string();
        assert!(msg.contains("'weight'"));
        assert!(msg.contains("created_at"));
    }
}
