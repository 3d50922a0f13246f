//! SQL DDL for initializing the database schema.

/// File created inside `DB_DIR`.
pub const DATABASE_FILE: &str = "mini_app.sqlite3";

/// SQLite schema includes:
/// - `workspace` table (exactly one row, id = 1, written on the first read-write open)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS workspace (
    id INTEGER PRIMARY KEY NOT NULL CHECK (id = 1),
    prefix TEXT NOT NULL,
    app_name TEXT NOT NULL,
    version TEXT NOT NULL,
    initialized INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL -- RFC3339
);
"#;

pub const INSERT_WORKSPACE: &str = r#"
INSERT INTO workspace (id, prefix, app_name, version, initialized, created_at)
VALUES (1, ?, ?, ?, 1, ?)
ON CONFLICT(id) DO NOTHING
"#;

pub const SELECT_WORKSPACE: &str = r#"
SELECT id, prefix, app_name, version, initialized, created_at
FROM workspace
WHERE id = 1
"#;
