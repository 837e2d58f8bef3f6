//! Main store implementation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use weatherly_core::{CacheResult, SessionCache};

use crate::error::{Error, Result};
use crate::schema;

/// SQLite-backed session cache.
///
/// Opening a store starts a new session: any entries left behind by an
/// earlier process are discarded. [`SessionStore::end`] closes the session
/// and deletes the database file.
pub struct SessionStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Open or create a session database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        info!("Opening session store at {}", path.display());
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        Self::start(conn, Some(path.to_path_buf()))
    }

    /// Open an in-memory session store.
    pub fn open_in_memory() -> Result<Self> {
        Self::start(Connection::open_in_memory()?, None)
    }

    fn start(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        schema::initialize(&conn)?;
        let stale = schema::reset_session(&conn)?;
        if stale > 0 {
            debug!(stale, "Discarded entries from a previous session");
        }
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Database file backing this store, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// End the session: close the connection and delete the database file.
    pub fn end(self) -> Result<()> {
        let Self { conn, path } = self;
        let conn = conn.into_inner().map_err(|_| Error::LockPoisoned)?;
        conn.close().map_err(|(_, e)| Error::Database(e))?;

        let Some(path) = path else {
            return Ok(());
        };
        for suffix in ["", "-wal", "-shm"] {
            let mut name = OsString::from(path.as_os_str());
            name.push(suffix);
            let file = PathBuf::from(name);
            match std::fs::remove_file(&file) {
                Ok(()) => debug!("Removed {}", file.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(Error::RemoveFile { path: file, source: e }),
            }
        }
        info!("Ended session store at {}", path.display());
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::LockPoisoned)
    }

    fn get_entry(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM session_cache WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put_entry(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO session_cache (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete_entry(&self, key: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM session_cache WHERE key = ?1", [key])?;
        Ok(())
    }

    fn clear_entries(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::reset_session(&conn)?;
        Ok(())
    }

    fn count_entries(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM session_cache", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl SessionCache for SessionStore {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.get_entry(key)?)
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        Ok(self.put_entry(key, value)?)
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        Ok(self.delete_entry(key)?)
    }

    fn clear(&self) -> CacheResult<()> {
        Ok(self.clear_entries()?)
    }

    fn len(&self) -> CacheResult<usize> {
        Ok(self.count_entries()?)
    }
}
