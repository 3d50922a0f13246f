use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DbError {
    #[error("failed to prepare database directory {}: {source}", path.display())]
    PrepareDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no database found at {} for a read-only instance", .0.display())]
    MissingDatabase(PathBuf),

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("database connection is not initialized")]
    NotInitialized,

    #[error("database initialization failed: {0}")]
    InitializationFailed(String),
}
