//! Database module: the connection handle and the engine behind it.
//!
//! Layout:
//! - `connection.rs`: process-wide handle with guarded one-time open
//! - `engine.rs`: traits the handle talks to
//! - `sqlite.rs`: SQLite engine stored in `DB_DIR`
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database

pub mod connection;
pub mod engine;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use connection::{Connection, ConnectionState};
pub use engine::{OpenOptions, ProbeReport, StorageEngine, StorageSession};
pub use models::WorkspaceRecord;
pub use schema::{DATABASE_FILE, SQLITE_INIT};
pub use sqlite::SqliteEngine;
