use openwith_preferences::{ComponentName, PreferenceError, PreferredApp, PreferredAppRepository};
use openwith_settings::SettingsStore;
use rusqlite::{Connection, ErrorCode, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

mod preference_store;

pub use preference_store::PreferenceStore;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    DatabaseError(rusqlite::Error),
    /// A racing writer tripped a uniqueness constraint. Retry as an upsert.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error(transparent)]
    Codec(#[from] PreferenceError),
    #[error("storage task failed: {0}")]
    TaskJoin(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::SqliteFailure(err, msg)
                if err.code == ErrorCode::ConstraintViolation =>
            {
                StorageError::ConstraintViolation(msg.unwrap_or_else(|| err.to_string()))
            }
            other => StorageError::DatabaseError(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_schema()?;
        tracing::debug!("Opened preference database at {}", path.display());
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_schema()?;
        Ok(db)
    }

    // Nothing a panicking holder could leave half-done lives outside SQLite.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS openwith (
                _id INTEGER PRIMARY KEY AUTOINCREMENT,
                host TEXT NOT NULL,
                component TEXT NOT NULL,
                preferred INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS index_openwith_host ON openwith(host);
            "#,
        )?;
        Ok(())
    }

    /// Stored component for `host`, decoded. Malformed values are an error.
    pub fn get_component(&self, host: &str) -> Result<Option<ComponentName>> {
        match self.get_preference(host)? {
            Some(app) => Ok(Some(app.component_name()?)),
            None => Ok(None),
        }
    }
}

fn row_to_preferred_app(row: &Row<'_>) -> rusqlite::Result<PreferredApp> {
    Ok(PreferredApp {
        id: row.get(0)?,
        host: row.get(1)?,
        component: row.get(2)?,
        preferred: row.get(3)?,
    })
}

impl PreferredAppRepository for Database {
    type Error = StorageError;

    fn get_preference(&self, host: &str) -> Result<Option<PreferredApp>> {
        let conn = self.conn();
        let result = conn.query_row(
            "SELECT _id, host, component, preferred FROM openwith WHERE host = ?1",
            [host],
            row_to_preferred_app,
        );
        match result {
            Ok(app) => Ok(Some(app)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_preference(&self, host: &str, component: &ComponentName, preferred: bool) -> Result<()> {
        let conn = self.conn();
        // Single statement: the row id survives and racing writers resolve last-write-wins.
        conn.execute(
            "INSERT INTO openwith (host, component, preferred) VALUES (?1, ?2, ?3)
             ON CONFLICT(host) DO UPDATE SET component = excluded.component, preferred = excluded.preferred",
            (host, component.flatten_to_string(), preferred),
        )?;
        tracing::info!(host, %component, preferred, "Saved app preference");
        Ok(())
    }

    fn clear_preference(&self, host: &str) -> Result<()> {
        let conn = self.conn();
        let affected = conn.execute("DELETE FROM openwith WHERE host = ?1", [host])?;
        if affected > 0 {
            tracing::info!(host, "Cleared app preference");
        }
        Ok(())
    }

    fn list_preferences(&self) -> Result<Vec<PreferredApp>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT _id, host, component, preferred FROM openwith ORDER BY host")?;
        let rows = stmt.query_map([], row_to_preferred_app)?;

        let mut apps = Vec::new();
        for row in rows {
            apps.push(row?);
        }
        Ok(apps)
    }
}

impl SettingsStore for Database {
    type Error = StorageError;

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn();
        match conn.query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
            row.get(0)
        }) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            (key, value),
        )?;
        Ok(())
    }
}
