#![allow(dead_code)]

use async_trait::async_trait;
use mini_app::DbError;
use mini_app::db::{OpenOptions, ProbeReport, SqliteEngine, StorageEngine, StorageSession};
use std::{
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// Fresh, not yet created directory under the system temp dir.
pub fn temp_db_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!("mini-app-{tag}-{}-{nanos}", std::process::id()));
    path
}

/// A directory path nested under a regular file, so it can never be created.
pub fn unwritable_db_dir(tag: &str) -> (PathBuf, PathBuf) {
    let blocker = temp_db_dir(tag);
    std::fs::write(&blocker, b"not a directory").expect("failed to create blocker file");
    let db_dir = blocker.join("data");
    (blocker, db_dir)
}

pub fn cleanup(path: &Path) {
    if path.is_dir() {
        let _ = std::fs::remove_dir_all(path);
    } else {
        let _ = std::fs::remove_file(path);
    }
}

/// Real SQLite engine that counts opens and stalls each open a little,
/// widening the window for concurrent first callers.
pub struct CountingEngine {
    inner: SqliteEngine,
    opens: AtomicUsize,
    delay: Duration,
}

impl CountingEngine {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner: SqliteEngine,
            opens: AtomicUsize::new(0),
            delay,
        })
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorageEngine for CountingEngine {
    async fn open(&self, options: &OpenOptions) -> Result<Arc<dyn StorageSession>, DbError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.inner.open(options).await
    }
}

/// In-memory engine whose probe can be told to fail or to report a damaged
/// database.
#[derive(Default)]
pub struct FlakyEngine {
    opens: AtomicUsize,
    session: Arc<FlakySession>,
}

#[derive(Default)]
pub struct FlakySession {
    failing: AtomicBool,
    integrity: Mutex<Option<String>>,
}

impl FlakyEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.session.failing.store(failing, Ordering::SeqCst);
    }

    /// Integrity check output for later probes; `None` restores a healthy database.
    pub fn set_integrity(&self, integrity: Option<&str>) {
        *self.session.integrity.lock().expect("integrity lock poisoned") =
            integrity.map(str::to_string);
    }
}

#[async_trait]
impl StorageEngine for FlakyEngine {
    async fn open(&self, _options: &OpenOptions) -> Result<Arc<dyn StorageSession>, DbError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let session: Arc<dyn StorageSession> = self.session.clone();
        Ok(session)
    }
}

#[async_trait]
impl StorageSession for FlakySession {
    async fn probe(&self) -> Result<ProbeReport, DbError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }

        let integrity = self.integrity.lock().expect("integrity lock poisoned").clone();
        Ok(match integrity {
            Some(integrity) => ProbeReport {
                integrity,
                workspace: None,
            },
            None => ProbeReport::healthy(),
        })
    }

    async fn close(&self) {}
}
