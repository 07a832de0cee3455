// src/config.rs

use crate::constants::{APP_DIR_NAME, DB_FILE_NAME};
use crate::error::Result;
use crate::repository::{KvStore, MemoryStore, SqliteStore};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    /// Keep all state in memory; nothing is written to disk.
    pub in_memory: bool,
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>, catalog_path: Option<PathBuf>, in_memory: bool) -> Self {
        Config {
            data_dir: data_dir.unwrap_or_else(default_data_dir),
            catalog_path,
            in_memory,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn open_store(&self) -> Result<Arc<dyn KvStore>> {
        if self.in_memory {
            info!("Using in-memory store");
            return Ok(Arc::new(MemoryStore::new()));
        }

        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir)?;
        }
        let db_path = self.db_path();
        info!("Database path: {:?}", db_path);
        Ok(Arc::new(SqliteStore::open(&db_path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_store_creates_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = tmp.path().join("nested").join("app");
        let config = Config::new(Some(data_dir.clone()), None, false);

        let store = config.open_store().unwrap();
        store.set("k", "\"v\"").unwrap();

        assert!(data_dir.exists());
        assert!(config.db_path().exists());
    }

    #[test]
    fn test_in_memory_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let data_dir = tmp.path().join("unused");
        let config = Config::new(Some(data_dir.clone()), None, true);

        config.open_store().unwrap();
        assert!(!data_dir.exists());
    }
}
