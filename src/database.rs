// src/database.rs

use crate::error::Result;
use crate::models::{JsonProblem, Problem};
use log::{debug, info};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

const BUNDLED_CATALOG: &str = include_str!("data/problems.json");

pub fn init_db(conn: &Connection) -> Result<()> {
    debug!("init_db: Checking database schema...");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        ",
    )?;

    Ok(())
}

/// Parses a catalog JSON array, keeping the file's order.
pub fn parse_catalog(data: &str) -> Result<Vec<Problem>> {
    let problems: Vec<JsonProblem> = serde_json::from_str(data)?;
    Ok(problems.into_iter().map(Problem::from).collect())
}

pub fn bundled_catalog() -> Result<Vec<Problem>> {
    parse_catalog(BUNDLED_CATALOG)
}

/// Loads the catalog from `path`, or the bundled one when no path is given.
pub fn load_catalog(path: Option<&Path>) -> Result<Vec<Problem>> {
    let catalog = match path {
        Some(p) => {
            info!("Loading catalog from {:?}", p);
            parse_catalog(&fs::read_to_string(p)?)?
        }
        None => bundled_catalog()?,
    };
    debug!("Catalog loaded: {} problems", catalog.len());
    Ok(catalog)
}
