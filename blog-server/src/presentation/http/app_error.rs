use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

impl ErrorBody {
    fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }

    fn with_fields(errors: FieldErrors) -> Self {
        Self {
            message: "Validation error".to_string(),
            errors: Some(errors),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(format!("Invalid id: {}", rejection.body_text()))
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Domain(err) => match err {
                DomainError::Validation { field, message } => (
                    StatusCode::BAD_REQUEST,
                    ErrorBody::with_fields(BTreeMap::from([(
                        field.to_string(),
                        vec![message.to_string()],
                    )])),
                ),
                DomainError::AlreadyExists(_) => {
                    (StatusCode::CONFLICT, ErrorBody::plain("User already exists"))
                }
                DomainError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    ErrorBody::plain("Invalid credentials"),
                ),
                DomainError::Unauthorized => (
                    StatusCode::UNAUTHORIZED,
                    ErrorBody::plain("Authentication required"),
                ),
                DomainError::NotFound(what) => (
                    StatusCode::NOT_FOUND,
                    ErrorBody::plain(format!("Not found: {what}")),
                ),
                DomainError::Forbidden(reason) => (StatusCode::FORBIDDEN, ErrorBody::plain(reason)),
                DomainError::Unexpected(cause) => {
                    error!(%cause, "unexpected domain error");
                    internal()
                }
            },
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::with_fields(field_errors(&err)),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, ErrorBody::plain("Not found")),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::plain(msg)),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::plain("Authentication required"),
            ),
            AppError::Internal(err) => {
                error!(error = ?err, "internal error");
                internal()
            }
        };

        (status, Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, ErrorBody) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorBody::plain("Internal server error"),
    )
}

fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|err| {
                    err.message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| err.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use validator::Validate;

    use super::AppError;
    use crate::domain::error::DomainError;

    async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body must be readable")
            .to_bytes();
        let json = serde_json::from_slice(&bytes).expect("body must be json");
        (status, json)
    }

    #[tokio::test]
    async fn domain_validation_lists_the_field() {
        let (status, json) = error_to_response(AppError::Domain(DomainError::Validation {
            field: "title",
            message: "must be 1..200 chars",
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Validation error");
        assert_eq!(json["errors"]["title"][0], "must be 1..200 chars");
    }

    #[tokio::test]
    async fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::NotFound("post id: 1".into()), StatusCode::NOT_FOUND),
            (DomainError::AlreadyExists("email".into()), StatusCode::CONFLICT),
            (DomainError::Forbidden("nope"), StatusCode::FORBIDDEN),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];

        for (err, expected) in cases {
            let (status, json) = error_to_response(AppError::Domain(err)).await;
            assert_eq!(status, expected);
            assert!(json["message"].is_string());
            assert!(json.get("errors").is_none());
        }
    }

    #[tokio::test]
    async fn unexpected_errors_hide_the_cause() {
        let (status, json) =
            error_to_response(AppError::Domain(DomainError::Unexpected("db on fire".into())))
                .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Internal server error");

        let (status, _) =
            error_to_response(AppError::Internal(anyhow::anyhow!("boom"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(email(message = "Invalid email format"))]
        email: String,
        #[validate(length(min = 1))]
        password: String,
    }

    #[tokio::test]
    async fn validator_errors_are_grouped_by_field() {
        let err = Probe {
            email: "nope".to_string(),
            password: String::new(),
        }
        .validate()
        .expect_err("must fail");

        let (status, json) = error_to_response(AppError::from(err)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"]["email"][0], "Invalid email format");
        assert_eq!(json["errors"]["password"][0], "length");
    }
}
