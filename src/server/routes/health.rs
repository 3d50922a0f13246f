//! Health check endpoint.
//!
//! Lazily opens the database on first use, then probes it. This is the only
//! place where database liveness is observable over HTTP.

use crate::error::MiniAppError;
use crate::server::router::MiniAppState;
use axum::{Json, extract::State};
use mini_app_schema::HealthReport;
use tracing::{debug, warn};

/// `GET /healthcheck`
///
/// 200 with `ok` (or `degraded` when the integrity check complains),
/// 500 with `error` when the database cannot be opened or probed.
pub async fn healthcheck(
    State(state): State<MiniAppState>,
) -> Result<Json<HealthReport>, MiniAppError> {
    let connection = &state.connection;
    connection
        .ensure_initialized()
        .await
        .map_err(MiniAppError::Initialization)?;
    let probe = connection.status().await.map_err(MiniAppError::Probe)?;

    let report = if probe.is_ok() {
        let detail = match &probe.workspace {
            Some(workspace) => format!(
                "database connection is healthy (workspace {})",
                workspace.prefix
            ),
            None => "database connection is healthy".to_string(),
        };
        debug!(%detail, "Health check passed");
        HealthReport::ok(detail)
    } else {
        warn!(integrity = %probe.integrity, "Database integrity check reported problems");
        HealthReport::degraded(format!("integrity check reported: {}", probe.integrity))
    };

    let settings = &state.settings;
    Ok(Json(report.with_app(
        &settings.app_name,
        &settings.app_version,
        settings.instance_type.as_str(),
    )))
}
