use super::DbError;
use axum::{Json, http::StatusCode, response::IntoResponse};
use mini_app_schema::HealthReport;
use thiserror::Error as ThisError;
use tracing::error;

/// Errors surfaced at the HTTP boundary. None of them stop the server.
#[derive(Debug, ThisError)]
pub enum MiniAppError {
    #[error("{0}")]
    Initialization(DbError),

    #[error("{0}")]
    Probe(DbError),
}

impl IntoResponse for MiniAppError {
    fn into_response(self) -> axum::response::Response {
        let kind = match &self {
            MiniAppError::Initialization(_) => "initialization",
            MiniAppError::Probe(_) => "probe",
        };
        error!(kind, error = %self, "Health check failed");

        let report = HealthReport::error(format!("Health check failed: {self}"));
        (StatusCode::INTERNAL_SERVER_ERROR, Json(report)).into_response()
    }
}
