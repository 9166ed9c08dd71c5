//! Errors from the download endpoints and their HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use momentum_report::ReportError;
use thiserror::Error;

use crate::pipeline::LoadError;

/// Failures of the download endpoints.
///
/// The page itself never fails: pipeline errors are shown inline. Only the
/// export and snapshot endpoints, which return a file, answer with an error
/// status.
#[derive(Debug, Error)]
pub(crate) enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("{0}")]
    Report(#[from] ReportError),

    #[error("Nothing to export: select at least one graph or table")]
    NothingToExport,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Load(LoadError::Failed(_)) | Self::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Load(_) => StatusCode::NOT_FOUND,
            Self::NothingToExport => StatusCode::BAD_REQUEST,
        };
        tracing::warn!(%status, error = %self, "Request failed");

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
