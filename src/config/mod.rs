mod basic;
mod instance;

pub use basic::Settings;
pub use instance::{InstanceType, InvalidInstanceType};

use crate::error::ConfigError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};

/// Organization and project the data directory is namespaced under.
pub const ORG_NAME: &str = "miniapp";
pub const PROJECT_NAME: &str = "mini_app";
pub const ENV: &str = "dev";

/// Logical prefix recorded in the database workspace record.
pub const DATA_PREFIX: &str = "/miniapp/mini_app/dev/data";

/// Environment variables read by [`Settings::from_env`], lowercased.
const ENV_KEYS: &[&str] = &[
    "instance_type",
    "cache_size",
    "db_dir",
    "app_name",
    "app_version",
    "debug",
    "host",
    "port",
    "root_path",
    "loglevel",
    "init_on_startup",
];

impl Settings {
    /// Builds a Figment that merges defaults and environment variables.
    /// Uses raw env mapping, so field names map to env vars in UPPER_SNAKE_CASE.
    /// Variables set to an empty string are treated as unset.
    pub fn figment() -> Figment {
        let env = Env::raw().only(ENV_KEYS).filter(|key| {
            std::env::var(key.as_str()).is_ok_and(|value| !value.trim().is_empty())
        });

        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(env)
    }

    /// Loads settings from the environment (with defaults) and validates them.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let mut settings: Self = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks semantic constraints serde cannot express and normalizes `root_path`.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.cache_size == 0 {
            return Err(ConfigError::Invalid(
                "CACHE_SIZE must be a positive number of GiB".to_string(),
            ));
        }

        if self.db_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("DB_DIR must not be empty".to_string()));
        }

        let root_path = self.root_path.trim().trim_end_matches('/');
        if !root_path.is_empty() && !root_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "ROOT_PATH must start with '/', got {:?}",
                self.root_path
            )));
        }
        self.root_path = root_path.to_string();

        Ok(())
    }
}
