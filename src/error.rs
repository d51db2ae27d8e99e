use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Outward error taxonomy shared by every handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<&'static str>,
    },
    #[error("{0}")]
    Unauthenticated(&'static str),
    #[error("Forbidden")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            field: Some(field),
        }
    }

    pub fn unauthenticated() -> Self {
        AppError::Unauthenticated("Authentication required")
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// SQLSTATE class 22: numeric overflow, invalid byte sequence and friends.
fn is_data_exception(code: &str) -> bool {
    code.starts_with("22")
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Constraint violations are the database restating a validation rule.
        if let Some(sqlx::Error::Database(db)) = err.downcast_ref::<sqlx::Error>() {
            if db.is_check_violation() {
                return AppError::Validation {
                    message: "Value violates a data constraint".into(),
                    field: None,
                };
            }
            if db.is_unique_violation() {
                return AppError::Conflict("Record already exists".into());
            }
            if matches!(db.kind(), sqlx::error::ErrorKind::NotNullViolation) {
                return AppError::Validation {
                    message: "A required value is missing".into(),
                    field: None,
                };
            }
            if db.is_foreign_key_violation() {
                return AppError::Validation {
                    message: "Referenced record does not exist".into(),
                    field: None,
                };
            }
            if db.code().as_deref().is_some_and(is_data_exception) {
                return AppError::Validation {
                    message: "Value is out of range or malformed".into(),
                    field: None,
                };
            }
        }
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, field) = match self {
            AppError::Internal(e) => {
                error!(error = ?e, "internal error");
                ("Internal server error".to_string(), None)
            }
            AppError::Validation { message, field } => (message, field),
            other => (other.to_string(), None),
        };
        (status, Json(ErrorBody { message, field })).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_carries_message_and_field() {
        let (status, body) = body_of(AppError::validation("email", "Invalid email address")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid email address");
        assert_eq!(body["field"], "email");
    }

    #[tokio::test]
    async fn internal_error_hides_detail() {
        let err = AppError::from(anyhow::anyhow!("connection refused to 10.0.0.3"));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
        assert!(body.get("field").is_none());
    }

    #[tokio::test]
    async fn not_found_names_the_record() {
        let (status, body) = body_of(AppError::NotFound("Trip")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Trip not found");
    }

    #[test]
    fn data_exception_class() {
        assert!(is_data_exception("22003"));
        assert!(is_data_exception("22021"));
        assert!(!is_data_exception("23505"));
    }

    #[test]
    fn status_mapping() {
        assert_eq!(AppError::unauthenticated().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
    }
}
