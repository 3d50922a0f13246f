use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Singleton row marking the data directory as initialized by this application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct WorkspaceRecord {
    pub id: i64,
    pub prefix: String,
    pub app_name: String,
    pub version: String,
    pub initialized: bool,
    pub created_at: DateTime<Utc>,
}
