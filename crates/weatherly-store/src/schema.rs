//! Database schema.

use rusqlite::Connection;

use crate::error::Result;

/// Create the session table if it does not exist.
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Namespaced cache keys to serialized reports (or "null")
        CREATE TABLE IF NOT EXISTS session_cache (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Drop every cached entry, starting a fresh session.
pub fn reset_session(conn: &Connection) -> Result<usize> {
    Ok(conn.execute("DELETE FROM session_cache", [])?)
}
