mod app;
mod config;
mod db;

pub use app::MiniAppError;
pub use config::ConfigError;
pub use db::DbError;
