use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use thiserror::Error;

use crate::{gemini::GeminiError, generator::GenerationError, models::ErrorBody};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl AppError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Generation(GenerationError::Unavailable(_)) => (StatusCode::BAD_GATEWAY, "Upstream"),
        }
    }

    /// Browser-facing message. Upstream response bodies stay in the server log.
    fn detail(&self) -> String {
        match self {
            AppError::Generation(GenerationError::Unavailable(GeminiError::Status { status, .. })) => {
                format!("content service unavailable: upstream status {}", status)
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        let body = ErrorBody { error: kind, detail: self.detail() };
        (status, Json(body)).into_response()
    }
}
