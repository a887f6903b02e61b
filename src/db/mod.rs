//! SQLite-backed alloy reference store
//!
//! A thin connection wrapper plus three layers that keep the SQL close to
//! the types it feeds:
//! - `schema`: DDL and version stamping
//! - `queries`: read-side finders keyed by brand
//! - `store`: write-side CRUD
//!
//! The database is the primary store (not a rebuildable cache), so a
//! schema version mismatch is an error rather than a silent rebuild.

mod queries;
mod schema;
mod store;

pub use queries::{ClassCount, MaterialFilter};

use std::fs;
use std::path::{Path, PathBuf};

use miette::{miette, IntoDiagnostic, Result};
use rusqlite::Connection;

/// Current schema version; bumped only with a data migration path
const SCHEMA_VERSION: i32 = 3;

/// The alloy reference database
pub struct AlloyDb {
    conn: Connection,
    path: Option<PathBuf>,
}

impl AlloyDb {
    /// Open or create the database at `path`.
    ///
    /// A fresh file gets the full schema; an existing file is checked
    /// against the supported schema version.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).into_diagnostic()?;
            }
        }

        let conn = Connection::open(path).into_diagnostic()?;
        let db = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        db.configure()?;

        match db.stored_version()? {
            None => db.init_schema()?,
            Some(v) if v == SCHEMA_VERSION => {}
            Some(v) => {
                return Err(miette!(
                    "database {} has schema version {v}, this build supports version {SCHEMA_VERSION}",
                    path.display()
                ));
            }
        }

        Ok(db)
    }

    /// Open a throwaway in-memory database (tests, dry runs)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().into_diagnostic()?;
        let db = Self { conn, path: None };
        db.configure()?;
        db.init_schema()?;
        Ok(db)
    }

    /// Path the database was opened from, if file-backed
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn configure(&self) -> Result<()> {
        // WAL for concurrent readers; FK enforcement is per-connection
        self.conn
            .execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .into_diagnostic()
    }

    /// Stored schema version, or `None` for a database without one
    fn stored_version(&self) -> Result<Option<i32>> {
        let has_table: bool = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
                [],
                |row| row.get::<_, i64>(0).map(|n| n > 0),
            )
            .into_diagnostic()?;

        if !has_table {
            return Ok(None);
        }

        self.conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .into_diagnostic()
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_initializes_schema() {
        let db = AlloyDb::open_in_memory().unwrap();
        assert_eq!(db.stored_version().unwrap(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_open_creates_file_and_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alloys.db");

        {
            let db = AlloyDb::open(&path).unwrap();
            assert_eq!(db.path(), Some(path.as_path()));
        }
        // Second open must see the stamped version, not re-init
        let db = AlloyDb::open(&path).unwrap();
        assert_eq!(db.stored_version().unwrap(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_version_mismatch_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alloys.db");

        {
            let db = AlloyDb::open(&path).unwrap();
            db.conn
                .execute("UPDATE schema_version SET version = 999", [])
                .unwrap();
        }
        assert!(AlloyDb::open(&path).is_err());
    }
}
