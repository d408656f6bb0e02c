use hyper::{Body, Response, StatusCode};
use serde_json::json;

use super::reply::json_response;

/// Everything a request handler can fail with. Each variant maps onto exactly
/// one HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("LIFX API token not configured")]
    MissingToken,

    #[error("{message}")]
    Upstream {
        status: StatusCode,
        message: &'static str,
    },

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Internal(eyre::Report),
}

impl From<eyre::Report> for ApiError {
    fn from(e: eyre::Report) -> Self {
        ApiError::Internal(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MissingToken => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream { status, .. } => *status,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its JSON reply. `context` is the generic
    /// message used when the real cause must not leak to the browser.
    pub fn into_response(self, context: &str) -> Response<Body> {
        let status = self.status();

        let message = match &self {
            ApiError::Internal(e) => {
                log::error!("{context}: {e:?}");
                format!("An error occurred while {context}")
            }
            other => other.to_string(),
        };

        json_response(status, &json!({ "error": message }))
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for ApiError {
    fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = e.path().to_string();
        let inner = e.into_inner();

        if path == "." {
            ApiError::BadRequest(format!("Invalid request body: {inner}"))
        } else {
            ApiError::BadRequest(format!("Invalid value for {path}: {inner}"))
        }
    }
}
