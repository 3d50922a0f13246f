use serde::{Deserialize, Serialize};

/// Payload of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RootInfo {
    pub message: String,
    pub app_name: String,
    pub version: String,
    /// Path of the health endpoint, including any configured root path.
    pub healthcheck: String,
}

impl RootInfo {
    pub fn new(app_name: &str, version: &str, root_path: &str) -> Self {
        Self {
            message: format!("Welcome to {app_name}!"),
            app_name: app_name.to_string(),
            version: version.to_string(),
            healthcheck: format!("{root_path}/healthcheck"),
        }
    }
}
