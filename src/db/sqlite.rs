use crate::db::engine::{OpenOptions, ProbeReport, StorageEngine, StorageSession};
use crate::db::models::WorkspaceRecord;
use crate::db::schema::{DATABASE_FILE, INSERT_WORKSPACE, SELECT_WORKSPACE, SQLITE_INIT};
use crate::error::DbError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

/// Embedded SQLite database stored in `DB_DIR`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteEngine;

#[async_trait]
impl StorageEngine for SqliteEngine {
    async fn open(&self, options: &OpenOptions) -> Result<Arc<dyn StorageSession>, DbError> {
        let path = options.db_dir.join(DATABASE_FILE);

        // PRAGMA cache_size takes KiB when negative.
        let cache_size_kib = options.cache_size_bytes / 1024;
        let connect_opts = SqliteConnectOptions::new()
            .filename(&path)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", format!("-{cache_size_kib}"));

        let connect_opts = if options.read_write {
            tokio::fs::create_dir_all(&options.db_dir)
                .await
                .map_err(|source| DbError::PrepareDir {
                    path: options.db_dir.clone(),
                    source,
                })?;

            connect_opts
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        } else {
            if !matches!(tokio::fs::try_exists(&path).await, Ok(true)) {
                return Err(DbError::MissingDatabase(path));
            }
            connect_opts.read_only(true).create_if_missing(false)
        };

        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;

        if options.read_write {
            apply_schema(&pool).await?;
            sqlx::query(INSERT_WORKSPACE)
                .bind(options.prefix.as_str())
                .bind(options.app_name.as_str())
                .bind(options.app_version.as_str())
                .bind(Utc::now())
                .execute(&pool)
                .await?;
        }

        info!(
            path = %path.display(),
            read_write = options.read_write,
            cache_size_kib,
            "SQLite database opened"
        );
        Ok(Arc::new(SqliteSession { pool }))
    }
}

struct SqliteSession {
    pool: SqlitePool,
}

#[async_trait]
impl StorageSession for SqliteSession {
    async fn probe(&self) -> Result<ProbeReport, DbError> {
        let lines: Vec<String> = sqlx::query_scalar("PRAGMA quick_check")
            .fetch_all(&self.pool)
            .await?;
        let workspace: Option<WorkspaceRecord> = sqlx::query_as(SELECT_WORKSPACE)
            .fetch_optional(&self.pool)
            .await?;

        let integrity = lines.join("; ");
        debug!(%integrity, has_workspace = workspace.is_some(), "SQLite probe finished");
        Ok(ProbeReport {
            integrity,
            workspace,
        })
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("SQLite database closed");
    }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), DbError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
