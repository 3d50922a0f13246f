use crate::config::Settings;
use crate::db::engine::{OpenOptions, ProbeReport, StorageEngine, StorageSession};
use crate::db::sqlite::SqliteEngine;
use crate::error::DbError;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Observable lifecycle of a [`Connection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Uninitialized,
    Initialized,
    /// The last open attempt failed. The next `ensure_initialized` retries.
    Failed(String),
}

enum State {
    Uninitialized,
    Initialized(Arc<dyn StorageSession>),
    Failed(String),
}

/// Shared handle to the database, opened at most once.
///
/// The state lock is held across the engine open, so concurrent first callers
/// queue behind a single open instead of racing.
pub struct Connection {
    engine: Arc<dyn StorageEngine>,
    options: OpenOptions,
    state: Mutex<State>,
}

impl Connection {
    pub fn new(engine: Arc<dyn StorageEngine>, options: OpenOptions) -> Self {
        Self {
            engine,
            options,
            state: Mutex::new(State::Uninitialized),
        }
    }

    /// Handle backed by the SQLite engine in `settings.db_dir`.
    pub fn sqlite(settings: &Settings) -> Self {
        Self::new(
            Arc::new(SqliteEngine),
            OpenOptions::from_settings(settings),
        )
    }

    /// Options every open attempt is made with.
    pub fn options(&self) -> &OpenOptions {
        &self.options
    }

    pub async fn state(&self) -> ConnectionState {
        match &*self.state.lock().await {
            State::Uninitialized => ConnectionState::Uninitialized,
            State::Initialized(_) => ConnectionState::Initialized,
            State::Failed(detail) => ConnectionState::Failed(detail.clone()),
        }
    }

    /// Opens the database unless it is already open.
    pub async fn ensure_initialized(&self) -> Result<(), DbError> {
        let mut state = self.state.lock().await;
        if matches!(*state, State::Initialized(_)) {
            return Ok(());
        }

        debug!(
            db_dir = %self.options.db_dir.display(),
            read_write = self.options.read_write,
            "Opening database"
        );
        match self.engine.open(&self.options).await {
            Ok(session) => {
                *state = State::Initialized(session);
                info!(
                    db_dir = %self.options.db_dir.display(),
                    read_write = self.options.read_write,
                    cache_size_bytes = self.options.cache_size_bytes,
                    "Database connection initialized"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    db_dir = %self.options.db_dir.display(),
                    error = %e,
                    "Database initialization failed"
                );
                *state = State::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Probes an initialized connection without changing its state.
    pub async fn status(&self) -> Result<ProbeReport, DbError> {
        let session = match &*self.state.lock().await {
            State::Initialized(session) => session.clone(),
            State::Uninitialized => return Err(DbError::NotInitialized),
            State::Failed(detail) => return Err(DbError::InitializationFailed(detail.clone())),
        };
        session.probe().await
    }

    /// Lazily opens, then probes.
    pub async fn check(&self) -> Result<ProbeReport, DbError> {
        self.ensure_initialized().await?;
        self.status().await
    }

    pub async fn close(&self) {
        let previous = std::mem::replace(&mut *self.state.lock().await, State::Uninitialized);
        if let State::Initialized(session) = previous {
            session.close().await;
            info!("Database connection closed");
        }
    }
}
