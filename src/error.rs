use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad input shape or range. Never retried by the client.
    #[error("{0}")]
    Validation(String),

    /// Query-string input that fails the endpoint's constraints.
    #[error("{0}")]
    UnprocessableQuery(String),

    #[error("{0}")]
    NotFound(String),

    /// The backing store is unreachable or failed mid-operation.
    /// Surfaced to the operator; not retried internally.
    #[error("store unavailable")]
    Store(#[source] anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Store(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(ref e) => {
                error!(error = %e, "store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::Validation("bad grams".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::UnprocessableQuery("too short".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::NotFound("nothing".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Store(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
