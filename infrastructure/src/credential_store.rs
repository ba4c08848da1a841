use domain::mode::CredentialSource;
use parking_lot::{Mutex, RwLock};
use rusqlite::{params, Connection, OptionalExtension, Result as SqlResult};
use shared::types::Result;
use std::path::Path;
use tracing::debug;

pub const API_KEY: &str = "gemini_api_key";

/// Single-table string store standing in for browser local storage.
pub struct SettingsStorage {
    conn: Connection,
}

impl SettingsStorage {
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        Self::setup_db(&conn)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::setup_db(&conn)?;
        Ok(Self { conn })
    }

    fn setup_db(conn: &Connection) -> SqlResult<()> {
        conn.execute_batch(
            "
            PRAGMA synchronous=NORMAL;
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
        ",
        )
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Holds the one API credential, mirrored in memory for the session.
///
/// With [`CredentialSource::Env`] nothing touches storage: `set` only changes
/// the session value. Otherwise the persisted key wins over the environment
/// default, and `set`/`clear` write through.
pub struct CredentialStore {
    storage: Mutex<SettingsStorage>,
    current: RwLock<Option<String>>,
    source: CredentialSource,
}

impl CredentialStore {
    pub fn new(
        storage: SettingsStorage,
        source: CredentialSource,
        env_default: Option<String>,
    ) -> Result<Self> {
        let persisted = match source {
            CredentialSource::Env => None,
            CredentialSource::Storage | CredentialSource::Prompt => storage
                .get(API_KEY)?
                .filter(|v| !v.trim().is_empty()),
        };
        let current = persisted.or(env_default.filter(|v| !v.trim().is_empty()));
        debug!(%source, resolved = current.is_some(), "credential store ready");
        Ok(Self {
            storage: Mutex::new(storage),
            current: RwLock::new(current),
            source,
        })
    }

    pub fn open(
        db_path: impl AsRef<Path>,
        source: CredentialSource,
        env_default: Option<String>,
    ) -> Result<Self> {
        Self::new(SettingsStorage::open(db_path)?, source, env_default)
    }

    /// The credential, or an empty string when none is set.
    pub fn get(&self) -> String {
        self.current.read().clone().unwrap_or_default()
    }

    pub fn is_set(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// An empty (or all-whitespace) value clears; anything else is stored
    /// exactly as given.
    pub fn set(&self, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return self.clear();
        }
        if self.source != CredentialSource::Env {
            self.storage.lock().set(API_KEY, value)?;
        }
        *self.current.write() = Some(value.to_string());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.source != CredentialSource::Env {
            self.storage.lock().remove(API_KEY)?;
        }
        *self.current.write() = None;
        Ok(())
    }
}
