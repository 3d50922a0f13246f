use crate::server::router::MiniAppState;
use axum::{Json, extract::State};
use mini_app_schema::RootInfo;

/// `GET /`: static application metadata, independent of the database.
pub async fn root(State(state): State<MiniAppState>) -> Json<RootInfo> {
    let settings = &state.settings;
    Json(RootInfo::new(
        &settings.app_name,
        &settings.app_version,
        &settings.root_path,
    ))
}
