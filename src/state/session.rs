use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::data::Session;

/// Storage key holding the stringified user id
pub const USER_KEY: &str = "user";
/// Storage key holding the raw bearer token
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not create storage directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// The SessionStore is the client's local storage: an opaque
/// string key/value table kept in a small SQLite database.
pub struct SessionStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl SessionStore {
    /// Open (or create) the store at the given path.
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(db_path)?;
        info!("📁 Session store opened at: {}", db_path.display());

        let store = SessionStore {
            conn,
            db_path: Some(db_path.to_path_buf()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// A store that lives only as long as the process
    pub fn in_memory() -> Result<Self, StoreError> {
        let store = SessionStore {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS storage (
                key             TEXT PRIMARY KEY,
                value           TEXT NOT NULL,
                updated_at      INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, value, Utc::now().timestamp()],
        )?;
        debug!(key, "storage item set");
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM storage WHERE key = ?1", [key])?;
        debug!(key, "storage item removed");
        Ok(())
    }

    /// The bearer token, if a non-empty one is stored
    pub fn token(&self) -> Result<Option<String>, StoreError> {
        Ok(self.get_item(TOKEN_KEY)?.filter(|token| !token.is_empty()))
    }

    /// The current session. A token is the only signal of being logged in.
    pub fn session(&self) -> Result<Option<Session>, StoreError> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };
        Ok(Some(Session {
            user_id: self.get_item(USER_KEY)?,
            token,
        }))
    }

    /// Persist a fresh login: the user id as a JSON string, the token raw
    pub fn save_session(&self, user_id: i64, token: &str) -> Result<(), StoreError> {
        self.set_item(USER_KEY, &serde_json::Value::from(user_id).to_string())?;
        self.set_item(TOKEN_KEY, token)?;
        info!(user_id, "session saved");
        Ok(())
    }

    /// Forget both session entries
    pub fn clear_session(&self) -> Result<(), StoreError> {
        self.remove_item(USER_KEY)?;
        self.remove_item(TOKEN_KEY)?;
        info!("session cleared");
        Ok(())
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}
