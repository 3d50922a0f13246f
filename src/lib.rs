pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod utils;

pub use config::Settings;
pub use db::Connection;
pub use error::{ConfigError, DbError, MiniAppError};
pub use server::{MiniAppState, mini_app_router};
