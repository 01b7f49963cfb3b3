use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use indexmap::IndexMap;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::state::error::StateError;
use crate::state::store::{StateStore, VersionBounds};

/// SQLite-backed application state.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(db_path: &Path) -> Result<Self, StateError> {
        info!("Opening state database at {:?}", db_path);

        let conn = Connection::open(db_path)?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        debug!("Database connection established");

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.create_schema()?;

        Ok(store)
    }

    /// Acquire database connection lock with proper error handling
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, StateError> {
        self.conn.lock().map_err(|_| StateError::LockPoisoned)
    }

    fn create_schema(&self) -> Result<(), StateError> {
        debug!("Creating database schema");

        let conn = self.lock_conn()?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS game_versions (
                game_id TEXT PRIMARY KEY,
                version TEXT NOT NULL
            )
            "#,
            [],
        )?;

        // rowid keeps installation order for the managed_mods snapshot
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS mods (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                game_id TEXT NOT NULL,
                mod_id TEXT NOT NULL,
                min_version TEXT,
                max_version TEXT,
                UNIQUE(game_id, mod_id)
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_mods_game_id ON mods(game_id)",
            [],
        )?;

        Ok(())
    }
}

impl StateStore for SqliteStore {
    fn previous_version(&self, game_id: &str) -> Result<Option<String>, StateError> {
        let conn = self.lock_conn()?;
        let result = conn.query_row(
            "SELECT version FROM game_versions WHERE game_id = ?1",
            [game_id],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(Some(version)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn record_version(&self, game_id: &str, version: Option<&str>) -> Result<(), StateError> {
        let conn = self.lock_conn()?;
        match version {
            Some(version) => {
                conn.execute(
                    r#"
                    INSERT INTO game_versions (game_id, version) VALUES (?1, ?2)
                    ON CONFLICT(game_id) DO UPDATE SET version = excluded.version
                    "#,
                    (game_id, version),
                )?;
            }
            None => {
                conn.execute("DELETE FROM game_versions WHERE game_id = ?1", [game_id])?;
            }
        }
        Ok(())
    }

    fn managed_mods(&self, game_id: &str) -> Result<IndexMap<String, VersionBounds>, StateError> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT mod_id, min_version, max_version FROM mods
            WHERE game_id = ?1
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([game_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                VersionBounds {
                    min_version: row.get(1)?,
                    max_version: row.get(2)?,
                },
            ))
        })?;

        let mut mods = IndexMap::new();
        for row in rows {
            let (mod_id, bounds) = row?;
            mods.insert(mod_id, bounds);
        }
        Ok(mods)
    }

    fn add_mod(
        &self,
        game_id: &str,
        mod_id: &str,
        bounds: &VersionBounds,
    ) -> Result<(), StateError> {
        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            INSERT INTO mods (game_id, mod_id, min_version, max_version)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(game_id, mod_id) DO UPDATE SET
                min_version = excluded.min_version,
                max_version = excluded.max_version
            "#,
            (
                game_id,
                mod_id,
                bounds.min_version.as_deref(),
                bounds.max_version.as_deref(),
            ),
        )?;
        Ok(())
    }
}
