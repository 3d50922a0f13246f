use thiserror::Error as ThisError;

/// Fatal startup error: the process must not bind with a partial configuration.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Figment(#[from] figment::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}
