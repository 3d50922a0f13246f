use super::InstanceType;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Database access mode.
    /// Env: `INSTANCE_TYPE` (`READONLY` or `R/W`). Default: `R/W`.
    #[serde(default)]
    pub instance_type: InstanceType,

    /// Database page cache budget in GiB.
    /// Env: `CACHE_SIZE`. Default: `1`.
    #[serde(default = "default_cache_size")]
    pub cache_size: u32,

    /// Directory owned by the database engine.
    /// Env: `DB_DIR`. Default: `/mini_app_data/`.
    #[serde(default = "default_db_dir")]
    #[serde(deserialize_with = "deserialize_path_lax")]
    pub db_dir: PathBuf,

    /// Env: `APP_NAME`. Default: `Mini App`.
    #[serde(default = "default_app_name")]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub app_name: String,

    /// Env: `APP_VERSION`. Default: `0.1.0`.
    #[serde(default = "default_app_version")]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub app_version: String,

    /// Verbose logging when no explicit filter is configured.
    /// Env: `DEBUG`. Default: `true`.
    #[serde(default = "default_true")]
    #[serde(deserialize_with = "deserialize_bool_lax")]
    pub debug: bool,

    /// HTTP server listen address, an IP address or a resolvable hostname.
    /// Env: `HOST`. Default: `0.0.0.0`.
    #[serde(default = "default_host")]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub host: String,

    /// HTTP server listen port.
    /// Env: `PORT`. Default: `8080`.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prefix all routes are mounted under when served behind a reverse proxy.
    /// Env: `ROOT_PATH`. Default: empty.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub root_path: String,

    /// Tracing filter directive, used when `RUST_LOG` is unset.
    /// Env: `LOGLEVEL`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_opt_string_lax")]
    pub loglevel: Option<String>,

    /// Open the database before accepting requests.
    /// Env: `INIT_ON_STARTUP`. Default: `true`.
    #[serde(default = "default_true")]
    #[serde(deserialize_with = "deserialize_bool_lax")]
    pub init_on_startup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instance_type: InstanceType::default(),
            cache_size: default_cache_size(),
            db_dir: default_db_dir(),
            app_name: default_app_name(),
            app_version: default_app_version(),
            debug: true,
            host: default_host(),
            port: default_port(),
            root_path: String::new(),
            loglevel: None,
            init_on_startup: true,
        }
    }
}

impl Settings {
    /// Listen address in the form `TcpListener::bind` resolves.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    pub fn cache_size_bytes(&self) -> u64 {
        u64::from(self.cache_size) << 30
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> String {
        match &self.loglevel {
            Some(level) if !level.trim().is_empty() => level.clone(),
            _ if self.debug => "mini_app=debug,tower_http=debug,sqlx=warn".to_string(),
            _ => "info".to_string(),
        }
    }
}

fn deserialize_string_lax<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(serde::de::Error::custom("expected a string")),
    }
}

fn deserialize_opt_string_lax<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(v) => deserialize_string_lax(v).map(Some).map_err(serde::de::Error::custom),
    }
}

fn deserialize_path_lax<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_string_lax(deserializer).map(PathBuf::from)
}

fn deserialize_bool_lax<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(serde::de::Error::custom(format!(
                "expected a boolean, got {n}"
            ))),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(serde::de::Error::custom(format!(
                "expected a boolean, got {s:?}"
            ))),
        },
        _ => Err(serde::de::Error::custom("expected a boolean")),
    }
}

fn default_cache_size() -> u32 {
    1
}

fn default_db_dir() -> PathBuf {
    PathBuf::from("/mini_app_data/")
}

fn default_app_name() -> String {
    "Mini App".to_string()
}

fn default_app_version() -> String {
    "0.1.0".to_string()
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}
