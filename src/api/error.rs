//! API errors and their HTTP mapping.
//!
//! Bodies follow one shape: `{"detail": ...}`, a string for 404 and 500 and
//! a list of field errors for 422.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

pub const NOT_FOUND_MESSAGE: &str = "Client non trouvé";

pub type ApiResult<T> = Result<T, ApiError>;

/// One failed constraint in a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Where the bad value sits, e.g. `["body", "nom"]`
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    /// An error on a body field; `path` may be dotted for nested values
    pub fn body(path: &str, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        let mut loc = vec!["body".to_string()];
        loc.extend(path.split('.').filter(|s| !s.is_empty()).map(str::to_string));
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("client not found")]
    NotFound,

    #[error("request validation failed")]
    Validation(Vec<FieldError>),

    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::NotFound => json!({ "detail": NOT_FOUND_MESSAGE }),
            ApiError::Validation(errors) => {
                tracing::debug!(errors = errors.len(), "rejected request payload");
                json!({ "detail": errors })
            }
            ApiError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                json!({ "detail": "Internal Server Error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let error = match &rejection {
            JsonRejection::JsonDataError(_) => FieldError::new(
                &["body"],
                "Input should be a valid dictionary or object",
                "dict_type",
            ),
            JsonRejection::JsonSyntaxError(_) => {
                FieldError::new(&["body"], rejection.body_text(), "json_invalid")
            }
            JsonRejection::MissingJsonContentType(_) => {
                FieldError::new(&["body"], rejection.body_text(), "content_type")
            }
            _ => FieldError::new(&["body"], rejection.body_text(), "body_unreadable"),
        };
        ApiError::Validation(vec![error])
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for ApiError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        ApiError::Validation(vec![FieldError::body(
            &path,
            err.inner().to_string(),
            "type_error",
        )])
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(vec![FieldError::new(
            &["path", "client_id"],
            rejection.body_text(),
            "int_parsing",
        )])
    }
}
