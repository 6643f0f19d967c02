//! Database schema and connection management

use rusqlite::Connection;
use std::{path::Path, time::Duration};

use crate::Result;

/// How long a writer waits on another process holding the database lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed lineup and standings store
pub struct LeagueDatabase {
    pub(crate) conn: Connection,
}

impl LeagueDatabase {
    /// Open (or create) the database at `path` and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// In-memory database, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&self) -> Result<()> {
        // One row per locked-in lineup; the primary key is the
        // append-if-absent guarantee.
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS lineups (
                week TEXT NOT NULL,
                manager TEXT NOT NULL,
                submitted_at INTEGER NOT NULL,
                PRIMARY KEY (week, manager)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS lineup_slots (
                week TEXT NOT NULL,
                manager TEXT NOT NULL,
                slot TEXT NOT NULL,
                name TEXT NOT NULL,
                position TEXT NOT NULL,
                team TEXT NOT NULL,
                opponent TEXT NOT NULL,
                salary INTEGER NOT NULL,
                fppg REAL NOT NULL,
                PRIMARY KEY (week, manager, slot),
                FOREIGN KEY (week, manager) REFERENCES lineups(week, manager)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS season_standings (
                manager TEXT PRIMARY KEY,
                total_points REAL NOT NULL DEFAULT 0,
                firsts INTEGER NOT NULL DEFAULT 0,
                seconds INTEGER NOT NULL DEFAULT 0,
                thirds INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS recorded_weeks (
                week TEXT PRIMARY KEY,
                recorded_at INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_lineup_slots_week
             ON lineup_slots(week)",
            [],
        )?;

        Ok(())
    }
}
