//! The seam between the service and the storage engine.
//!
//! The service only ever opens, probes and closes. Everything behind
//! [`StorageEngine::open`] (file layout, caching, journaling) belongs to the engine.

use crate::config::{DATA_PREFIX, Settings};
use crate::db::models::WorkspaceRecord;
use crate::error::DbError;
use async_trait::async_trait;
use std::{path::PathBuf, sync::Arc};

/// Everything an engine needs to open the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOptions {
    pub db_dir: PathBuf,
    pub read_write: bool,
    pub cache_size_bytes: u64,
    pub prefix: String,
    pub app_name: String,
    pub app_version: String,
}

impl OpenOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            db_dir: settings.db_dir.clone(),
            read_write: settings.instance_type.is_read_write(),
            cache_size_bytes: settings.cache_size_bytes(),
            prefix: DATA_PREFIX.to_string(),
            app_name: settings.app_name.clone(),
            app_version: settings.app_version.clone(),
        }
    }
}

/// Result of a successful probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    /// Output of the engine's integrity check, `"ok"` when healthy.
    pub integrity: String,
    pub workspace: Option<WorkspaceRecord>,
}

impl ProbeReport {
    pub fn healthy() -> Self {
        Self {
            integrity: "ok".to_string(),
            workspace: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.integrity == "ok"
    }
}

#[async_trait]
pub trait StorageEngine: Send + Sync + 'static {
    async fn open(&self, options: &OpenOptions) -> Result<Arc<dyn StorageSession>, DbError>;
}

#[async_trait]
pub trait StorageSession: Send + Sync + 'static {
    /// Must not change engine state.
    async fn probe(&self) -> Result<ProbeReport, DbError>;

    async fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstanceType;

    #[test]
    fn options_follow_settings() {
        let settings = Settings {
            instance_type: InstanceType::ReadOnly,
            cache_size: 3,
            db_dir: PathBuf::from("/tmp/t1"),
            ..Settings::default()
        };

        let options = OpenOptions::from_settings(&settings);
        assert!(!options.read_write);
        assert_eq!(options.cache_size_bytes, 3 << 30);
        assert_eq!(options.db_dir, PathBuf::from("/tmp/t1"));
        assert_eq!(options.prefix, DATA_PREFIX);
        assert_eq!(options.app_name, "Mini App");
    }
}
