// src/repository.rs

use crate::database;
use crate::error::{Error, Result};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// String key-value store the services persist through.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

// --- SQLite ---

pub struct SqliteStore {
    db: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Result<Self> {
        database::init_db(&conn)?;
        Ok(SqliteStore {
            db: Mutex::new(conn),
        })
    }

    pub fn open(path: &Path) -> Result<Self> {
        debug!("[DB] Opening store at {:?}", path);
        Self::new(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.db.lock().map_err(|_| Error::LockPoisoned)?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.db.lock().map_err(|_| Error::LockPoisoned)?;
        conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?, ?)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.db.lock().map_err(|_| Error::LockPoisoned)?;
        conn.execute("DELETE FROM kv_store WHERE key = ?", [key])?;
        Ok(())
    }
}

// --- In-Memory ---

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| Error::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| Error::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| Error::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }
}

// --- JSON helpers ---

pub fn save_json<T: Serialize + ?Sized>(store: &dyn KvStore, key: &str, value: &T) -> Result<()> {
    let encoded = serde_json::to_string(value)?;
    store.set(key, &encoded)
}

pub fn load_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Startup read: any failure means "fresh install" and falls back to the default.
pub fn load_json_or_default<T: DeserializeOwned + Default>(store: &dyn KvStore, key: &str) -> T {
    match load_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!("Failed to load '{}', using defaults: {}", key, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip_and_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_sqlite_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            save_json(&store, "favorites", &vec![3, 1]).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let favorites: Option<Vec<i64>> = load_json(&store, "favorites").unwrap();
        assert_eq!(favorites, Some(vec![3, 1]));

        store.remove("favorites").unwrap();
        assert_eq!(store.get("favorites").unwrap(), None);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set("currentStreak", "not json").unwrap();

        let streak: u32 = load_json_or_default(&store, "currentStreak");
        assert_eq!(streak, 0);
        assert!(load_json::<u32>(&store, "currentStreak").is_err());
    }
}
